//! Events delivered to the interpreter.
//!
//! Recognizer callbacks, synthesizer progress and UI buttons all arrive as
//! one [`Event`] type on one channel and are handled strictly in order.

use thiserror::Error;

use crate::speech::SynthEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Recognizer(RecognizerEvent),
    Synth(SynthEvent),
    Ui(UiEvent),
}

impl From<RecognizerEvent> for Event {
    fn from(e: RecognizerEvent) -> Self {
        Event::Recognizer(e)
    }
}

impl From<SynthEvent> for Event {
    fn from(e: SynthEvent) -> Self {
        Event::Synth(e)
    }
}

impl From<UiEvent> for Event {
    fn from(e: UiEvent) -> Self {
        Event::Ui(e)
    }
}

// ---------------------------------------------------------------------------
// RecognizerEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerEvent {
    /// A recognition session started listening.
    Started,
    /// A recognised phrase.  Interim results (`is_final == false`) are
    /// ignored.
    Transcript { text: String, is_final: bool },
    /// The session ended; the recognizer restarts it on its own.
    Ended,
    Error(RecognitionError),
}

impl RecognizerEvent {
    /// Final transcript shorthand.
    pub fn heard(text: impl Into<String>) -> Self {
        RecognizerEvent::Transcript {
            text: text.into(),
            is_final: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    /// No speech recognizer exists on this platform.
    #[error("speech recognition is not supported")]
    Unavailable,

    /// A running session reported an error.
    #[error("recognition session error: {0}")]
    Session(String),

    /// The microphone could not be opened.
    #[error("microphone could not be started: {0}")]
    Microphone(String),
}

// ---------------------------------------------------------------------------
// UiEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The user switched the microphone on.
    Start,
    ClearText,
    ClearPhotos,
    ClearLog,
    /// Finish pending speech, then stop.
    Quit,
}

impl UiEvent {
    /// Parse a console command such as `/clear-text`.
    ///
    /// ```
    /// use jarvis_voice::interpreter::UiEvent;
    ///
    /// assert_eq!(UiEvent::from_command("/start"), Some(UiEvent::Start));
    /// assert_eq!(UiEvent::from_command(" /Clear-Log "), Some(UiEvent::ClearLog));
    /// assert_eq!(UiEvent::from_command("toon tekst"), None);
    /// ```
    pub fn from_command(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "/start" => Some(UiEvent::Start),
            "/clear-text" => Some(UiEvent::ClearText),
            "/clear-photos" => Some(UiEvent::ClearPhotos),
            "/clear-log" => Some(UiEvent::ClearLog),
            "/quit" => Some(UiEvent::Quit),
            _ => None,
        }
    }
}
