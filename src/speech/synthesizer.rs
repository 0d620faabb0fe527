//! Speech synthesizer seam.
//!
//! [`SpeechSynthesizer`] is the device side of the speech queue.  `speak`
//! only starts playback; the device reports progress asynchronously through
//! [`SynthEvent`]s delivered on the interpreter's event channel.
//!
//! # Contract
//!
//! For every `speak` call that returns `Ok`, the device eventually sends
//! exactly one `Started(id)` followed by exactly one `Ended(id)` or
//! `Failed(id, _)`.  A call that returns `Err` sends nothing.

use thiserror::Error;

use super::queue::{Utterance, UtteranceId};
use super::voice::VoiceInfo;

// ---------------------------------------------------------------------------
// SynthesisError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// The device started the utterance but could not finish it.
    #[error("playback failed: {0}")]
    Playback(String),

    /// The device could not accept the utterance at all.
    #[error("synthesizer unavailable: {0}")]
    Device(String),
}

// ---------------------------------------------------------------------------
// SynthEvent
// ---------------------------------------------------------------------------

/// Progress reported by the synthesizer device.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthEvent {
    Started(UtteranceId),
    Ended(UtteranceId),
    Failed(UtteranceId, SynthesisError),
    /// The device's voice list became available or changed.
    VoicesChanged(Vec<VoiceInfo>),
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a speech output device.
///
/// `speak` must not block: it hands the utterance to the device and returns.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, utterance: &Utterance) -> Result<(), SynthesisError>;
}

const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechSynthesizer>) {}
};
