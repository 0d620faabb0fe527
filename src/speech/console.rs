//! Simulated synthesizer for the console binary.
//!
//! Logs each utterance and reports `Started`/`Ended` after a delay
//! proportional to its word count, as a real device would.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::interpreter::Event;

use super::queue::Utterance;
use super::synthesizer::{SpeechSynthesizer, SynthEvent, SynthesisError};

/// How long `text` takes to say at `words_per_minute`.
///
/// ```
/// use std::time::Duration;
/// use jarvis_voice::speech::simulated_duration;
///
/// assert_eq!(simulated_duration("een twee drie", 180), Duration::from_secs(1));
/// ```
pub fn simulated_duration(text: &str, words_per_minute: u32) -> Duration {
    let words = text.split_whitespace().count().max(1) as u64;
    let wpm = u64::from(words_per_minute.max(1));
    Duration::from_millis(words * 60_000 / wpm)
}

pub struct ConsoleSynthesizer {
    events: mpsc::Sender<Event>,
    words_per_minute: u32,
}

impl ConsoleSynthesizer {
    pub fn new(events: mpsc::Sender<Event>, words_per_minute: u32) -> Self {
        Self {
            events,
            words_per_minute,
        }
    }
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&self, utterance: &Utterance) -> Result<(), SynthesisError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SynthesisError::Device(e.to_string()))?;

        log::info!(
            "speech: #{} [{}{}] {}",
            utterance.id,
            utterance.lang,
            utterance
                .voice
                .as_deref()
                .map(|v| format!(", {v}"))
                .unwrap_or_default(),
            utterance.text
        );

        let id = utterance.id;
        let duration = simulated_duration(&utterance.text, self.words_per_minute);
        let events = self.events.clone();
        runtime.spawn(async move {
            if events.send(Event::Synth(SynthEvent::Started(id))).await.is_err() {
                return;
            }
            tokio::time::sleep(duration).await;
            // receiver gone means the interpreter already shut down
            let _ = events.send(Event::Synth(SynthEvent::Ended(id))).await;
        });
        Ok(())
    }
}
