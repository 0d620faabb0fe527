//! Synthesizer voice selection.

use serde::{Deserialize, Serialize};

/// A voice offered by the synthesizer device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub name: String,
    /// BCP 47 tag such as `nl-NL`.
    pub lang: String,
}

impl VoiceInfo {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn speaks(&self, prefix: &str) -> bool {
        self.lang.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

/// Pick the voice for spoken replies.
///
/// Tries each language prefix in `preferences` in order and returns the first
/// voice whose language starts with it.  Falls back to the first voice, or
/// `None` when the device offers none.
///
/// ```
/// use jarvis_voice::speech::{select_voice, VoiceInfo};
///
/// let voices = vec![
///     VoiceInfo::new("Samantha", "en-US"),
///     VoiceInfo::new("Xander", "nl-NL"),
/// ];
/// let prefs = vec!["nl".to_string(), "en".to_string()];
/// assert_eq!(select_voice(&voices, &prefs).unwrap().name, "Xander");
/// ```
pub fn select_voice<'a>(voices: &'a [VoiceInfo], preferences: &[String]) -> Option<&'a VoiceInfo> {
    preferences
        .iter()
        .find_map(|prefix| voices.iter().find(|v| v.speaks(prefix)))
        .or_else(|| voices.first())
}
