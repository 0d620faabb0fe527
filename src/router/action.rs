//! Side-effect requests emitted toward the display and speech collaborators.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// Who a conversation log row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// What the user said (normalized transcript).
    User,
    /// What the assistant did or said.
    Assistant,
}

impl Speaker {
    /// Tag shown in front of a log row: `USER`, or the assistant's name in
    /// capitals.
    pub fn tag(&self, assistant_name: &str) -> String {
        match self {
            Speaker::User => "USER".to_string(),
            Speaker::Assistant => assistant_name.trim().to_uppercase(),
        }
    }
}

// ---------------------------------------------------------------------------
// VoiceParams
// ---------------------------------------------------------------------------

/// Rate and pitch attached to every spoken reply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceParams {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// One-way side-effect request.
///
/// `Speak` is consumed by the speech queue; everything else goes to the
/// display sink.  Serialised as an internally tagged JSON object so the
/// console display can stream actions line by line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Say `text` out loud.
    Speak { text: String, rate: f32, pitch: f32 },
    /// Show `content` in the text panel.
    ShowText { content: String },
    /// Clear and hide the text panel.
    HideText,
    /// Fetch and show a photo of `query`.
    ShowPhoto { query: String },
    /// Empty the photo grid.
    ClearPhotos,
    /// Append a row to the conversation log.
    Log { speaker: Speaker, text: String },
    /// Empty the conversation log.
    ClearLog,
    /// Update the awake indicator.
    SetAwake { awake: bool },
    /// Update the microphone indicator.
    SetListening { listening: bool },
}

impl Action {
    pub fn speak(text: impl Into<String>, voice: VoiceParams) -> Self {
        Action::Speak {
            text: text.into(),
            rate: voice.rate,
            pitch: voice.pitch,
        }
    }

    /// Log row attributed to the assistant.
    pub fn log(text: impl Into<String>) -> Self {
        Action::Log {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }

    /// Log row attributed to the user.
    pub fn heard(text: impl Into<String>) -> Self {
        Action::Log {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    /// Text to speak, if this is a `Speak` action.
    pub fn spoken_text(&self) -> Option<&str> {
        match self {
            Action::Speak { text, .. } => Some(text),
            _ => None,
        }
    }
}
