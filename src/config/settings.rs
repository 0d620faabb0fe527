//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the
//! interpreter and its collaborators at startup.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// AssistantConfig
// ---------------------------------------------------------------------------

/// Identity of the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Name used in the wake and shutdown phrases (e.g. "jarvis wake up").
    ///
    /// Normalized the same way transcripts are, so `"Järvis"` and
    /// `"jarvis"` are equivalent.
    pub name: String,
    /// BCP-47 language tag attached to every utterance (e.g. `"nl-NL"`).
    pub language: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: "jarvis".into(),
            language: "nl-NL".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for spoken replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Playback rate passed to the synthesizer (1.0 = normal).
    pub rate: f32,
    /// Voice pitch passed to the synthesizer (1.0 = normal).
    pub pitch: f32,
    /// Language prefixes tried in order when picking a voice from the
    /// synthesizer's voice list.  The first voice overall is used when none
    /// match.
    pub preferred_languages: Vec<String>,
    /// Speaking speed of the console synthesizer, used to simulate how long
    /// an utterance takes to play.
    pub simulated_words_per_minute: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            preferred_languages: vec!["nl".into(), "en".into()],
            simulated_words_per_minute: 180,
        }
    }
}

// ---------------------------------------------------------------------------
// DisplayConfig
// ---------------------------------------------------------------------------

/// Settings for the display sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Maximum number of photos kept in the grid; older ones are dropped.
    pub max_photos: usize,
    /// Maximum number of conversation log rows kept.
    pub max_log_entries: usize,
    /// Image search endpoint.  The query is appended as the query string.
    pub photo_source_url: String,
    /// Seconds to wait for the image endpoint before rendering a placeholder.
    pub photo_timeout_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_photos: 9,
            max_log_entries: 200,
            photo_source_url: "https://source.unsplash.com/featured/800x600/".into(),
            photo_timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use jarvis_voice::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Assistant name and language.
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Spoken reply settings.
    #[serde(default)]
    pub speech: SpeechConfig,
    /// Display sink settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
