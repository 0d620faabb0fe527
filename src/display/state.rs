//! Display model: what a renderer shows at any moment.
//!
//! [`DisplayState`] is updated from [`Action`]s and read by whatever renders
//! it.  [`SharedDisplay`] is `Arc<Mutex<DisplayState>>`, cloned freely
//! between the display sink and photo fetch tasks.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::config::DisplayConfig;
use crate::router::{Action, Speaker};

use super::photo::PhotoTile;

/// Thread-safe handle to a [`DisplayState`].
pub type SharedDisplay = Arc<Mutex<DisplayState>>;

pub fn new_shared_display(config: &DisplayConfig, assistant_name: &str) -> SharedDisplay {
    Arc::new(Mutex::new(DisplayState::new(config, assistant_name)))
}

// ---------------------------------------------------------------------------
// LogEntry
// ---------------------------------------------------------------------------

/// One row of the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub speaker: Speaker,
    /// Row tag, see [`Speaker::tag`].
    pub tag: String,
    pub text: String,
    /// Local wall-clock time the row was added, `HH:MM:SS`.
    pub time: String,
}

impl LogEntry {
    pub fn new(speaker: Speaker, assistant_name: &str, text: impl Into<String>) -> Self {
        Self {
            speaker,
            tag: speaker.tag(assistant_name),
            text: text.into(),
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// `"[12:00:01] USER: jarvis wake up"`
    pub fn render(&self) -> String {
        format!("[{}] {}: {}", self.time, self.tag, self.text)
    }
}

// ---------------------------------------------------------------------------
// DisplayState
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct DisplayState {
    /// Text panel content; `None` while hidden.
    pub text: Option<String>,
    /// Photo grid, newest first.
    pub photos: VecDeque<PhotoTile>,
    /// Conversation log, newest first.
    pub log: VecDeque<LogEntry>,
    pub awake: bool,
    pub listening: bool,
    assistant_name: String,
    max_photos: usize,
    max_log_entries: usize,
}

impl DisplayState {
    pub fn new(config: &DisplayConfig, assistant_name: &str) -> Self {
        Self {
            text: None,
            photos: VecDeque::new(),
            log: VecDeque::new(),
            awake: false,
            listening: false,
            assistant_name: assistant_name.to_string(),
            max_photos: config.max_photos,
            max_log_entries: config.max_log_entries,
        }
    }

    /// Apply a display action.
    ///
    /// `Speak` belongs to the speech queue and `ShowPhoto` only resolves
    /// once the photo is fetched (see [`push_photo`](Self::push_photo)), so
    /// both leave the state untouched.
    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::ShowText { content } => self.text = Some(content.clone()),
            Action::HideText => self.text = None,
            Action::ClearPhotos => self.photos.clear(),
            Action::Log { speaker, text } => {
                self.log.push_front(LogEntry::new(*speaker, &self.assistant_name, text.clone()));
                self.log.truncate(self.max_log_entries);
            }
            Action::ClearLog => self.log.clear(),
            Action::SetAwake { awake } => self.awake = *awake,
            Action::SetListening { listening } => self.listening = *listening,
            Action::Speak { .. } | Action::ShowPhoto { .. } => {}
        }
    }

    /// Put a resolved photo at the front of the grid, dropping the oldest
    /// beyond the cap.
    pub fn push_photo(&mut self, tile: PhotoTile) {
        self.photos.push_front(tile);
        self.photos.truncate(self.max_photos);
    }

    pub fn awake_label(&self) -> &'static str {
        if self.awake {
            "Actief"
        } else {
            "Slaapstand"
        }
    }

    pub fn listening_label(&self) -> &'static str {
        if self.listening {
            "Microfoon aan"
        } else {
            "Microfoon uit"
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
