//! FIFO speech queue that keeps playback strictly sequential.
//!
//! The queue never talks to the device itself.  [`SpeechQueue::enqueue`] and
//! the completion handlers return the [`Utterance`] that must be dispatched
//! next, if any, and the caller hands it to the synthesizer:
//!
//! ```text
//! enqueue ──idle──▶ dispatch now
//!         ──busy──▶ pending.push_back
//!
//! on_start(active) ─▶ speaking = true
//! on_end(active)   ─▶ speaking = false, dispatch pending.pop_front
//! on_error(active) ─▶ drop entry, same as on_end
//! signals for any other id are ignored
//! ```

use std::collections::VecDeque;

/// Identifier handed out per enqueued utterance.
pub type UtteranceId = u64;

/// One pending or active spoken reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    /// Language tag the synthesizer should speak in.
    pub lang: String,
    /// Selected device voice; `None` leaves the choice to the device.
    pub voice: Option<String>,
}

// ---------------------------------------------------------------------------
// SpeechQueue
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SpeechQueue {
    pending: VecDeque<Utterance>,
    /// Dispatched utterance awaiting its end or error signal.
    active: Option<UtteranceId>,
    speaking: bool,
    next_id: UtteranceId,
    lang: String,
    voice: Option<String>,
}

impl SpeechQueue {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            pending: VecDeque::new(),
            active: None,
            speaking: false,
            next_id: 1,
            lang: lang.into(),
            voice: None,
        }
    }

    /// Voice stamped on utterances enqueued from now on.
    pub fn set_voice(&mut self, voice: Option<String>) {
        self.voice = voice;
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// Queue `text` for playback.
    ///
    /// Returns the utterance to dispatch immediately when nothing is active
    /// and nothing is waiting; otherwise appends it and returns `None`.
    pub fn enqueue(&mut self, text: impl Into<String>, rate: f32, pitch: f32) -> Option<Utterance> {
        let utterance = Utterance {
            id: self.next_id,
            text: text.into(),
            rate,
            pitch,
            lang: self.lang.clone(),
            voice: self.voice.clone(),
        };
        self.next_id += 1;

        if self.active.is_none() && self.pending.is_empty() {
            self.active = Some(utterance.id);
            Some(utterance)
        } else {
            log::debug!(
                "speech: queued #{} behind {} pending",
                utterance.id,
                self.pending.len()
            );
            self.pending.push_back(utterance);
            None
        }
    }

    /// Device reported that `id` started playing.
    pub fn on_start(&mut self, id: UtteranceId) {
        if self.active == Some(id) {
            self.speaking = true;
        } else {
            log::warn!("speech: ignoring start for inactive utterance #{id}");
        }
    }

    /// Device reported that `id` finished.  Returns the next utterance to
    /// dispatch.
    pub fn on_end(&mut self, id: UtteranceId) -> Option<Utterance> {
        if self.active != Some(id) {
            log::warn!("speech: ignoring end for inactive utterance #{id}");
            return None;
        }
        self.finish_active()
    }

    /// Device failed to play `id`.  The entry is dropped without retry and
    /// the next utterance, if any, is returned for dispatch.
    pub fn on_error(&mut self, id: UtteranceId) -> Option<Utterance> {
        if self.active != Some(id) {
            log::warn!("speech: ignoring error for inactive utterance #{id}");
            return None;
        }
        log::warn!("speech: dropping utterance #{id} after playback error");
        self.finish_active()
    }

    fn finish_active(&mut self) -> Option<Utterance> {
        self.speaking = false;
        self.active = None;
        let next = self.pending.pop_front()?;
        self.active = Some(next.id);
        Some(next)
    }

    /// `true` once the device confirmed the active utterance is playing.
    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// Id of the dispatched utterance still awaiting completion.
    pub fn active(&self) -> Option<UtteranceId> {
        self.active
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Nothing active and nothing waiting.
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.pending.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
