//! Intent classification.
//!
//! * [`Intent`]: the closed set of meanings a transcript can carry.
//! * [`IntentMatcher`]: ordered table of pattern rules, first match wins.
//! * [`sanitize_query`]: cleanup applied to photo subjects.
//!
//! # Quick start
//!
//! ```rust
//! use jarvis_voice::intent::{Intent, IntentMatcher};
//! use jarvis_voice::transcript::normalize;
//!
//! let matcher = IntentMatcher::new("jarvis").unwrap();
//!
//! assert_eq!(matcher.classify(&normalize("Jarvis wake up")), Intent::Wake);
//! assert_eq!(
//!     matcher.classify(&normalize("foto van katten")),
//!     Intent::ShowPhoto("katten".into()),
//! );
//! assert_eq!(matcher.classify("willekeurige tekst"), Intent::Fallback);
//! ```

pub mod matcher;

pub use matcher::{sanitize_query, IntentMatcher, MatcherError, MAX_QUERY_CHARS};

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// The classified meaning of one normalized transcript.
///
/// Exactly one intent is derived per transcript; [`Intent::Fallback`] covers
/// everything no rule recognises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// "jarvis wake up" and variants.
    Wake,
    /// "jarvis shut down" and variants.
    Shutdown,
    /// Request for the capability summary.
    Help,
    /// Hide the text panel.
    ClearText,
    /// Show and speak the payload.
    ShowText(String),
    /// Look up and show a photo of the query.
    ShowPhoto(String),
    /// Nothing matched.
    Fallback,
}

impl Intent {
    /// `true` for the intents that toggle the assistant state and therefore
    /// work while sleeping.
    pub fn is_wake_control(&self) -> bool {
        matches!(self, Intent::Wake | Intent::Shutdown)
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Wake => "wake",
            Intent::Shutdown => "shutdown",
            Intent::Help => "help",
            Intent::ClearText => "clear-text",
            Intent::ShowText(_) => "show-text",
            Intent::ShowPhoto(_) => "show-photo",
            Intent::Fallback => "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_wake_and_shutdown_are_wake_control() {
        assert!(Intent::Wake.is_wake_control());
        assert!(Intent::Shutdown.is_wake_control());
        assert!(!Intent::Help.is_wake_control());
        assert!(!Intent::ClearText.is_wake_control());
        assert!(!Intent::ShowText("x".into()).is_wake_control());
        assert!(!Intent::ShowPhoto("x".into()).is_wake_control());
        assert!(!Intent::Fallback.is_wake_control());
    }

    #[test]
    fn labels_are_distinct() {
        let labels = [
            Intent::Wake.label(),
            Intent::Shutdown.label(),
            Intent::Help.label(),
            Intent::ClearText.label(),
            Intent::ShowText(String::new()).label(),
            Intent::ShowPhoto(String::new()).label(),
            Intent::Fallback.label(),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
