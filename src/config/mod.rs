//! Configuration module for the Jarvis voice interpreter.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the assistant,
//! speech output and display, `AppPaths` for the platform config directory,
//! and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, AssistantConfig, DisplayConfig, SpeechConfig};
