//! Speech output: sequential playback of spoken replies.
//!
//! * [`SpeechQueue`]: FIFO queue with at most one active utterance.
//! * [`SpeechSynthesizer`]: device seam; progress comes back as [`SynthEvent`]s.
//! * [`ConsoleSynthesizer`]: simulated device used by the console binary.
//! * [`select_voice`]: picks the device voice from language preferences.

pub mod console;
pub mod queue;
pub mod synthesizer;
pub mod voice;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use console::{simulated_duration, ConsoleSynthesizer};
pub use queue::{SpeechQueue, Utterance, UtteranceId};
pub use synthesizer::{SpeechSynthesizer, SynthEvent, SynthesisError};
pub use voice::{select_voice, VoiceInfo};
