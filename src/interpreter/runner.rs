//! Orchestrator: drives the [`Interpreter`] from an event channel.
//!
//! [`Orchestrator`] owns the interpreter and receives [`Event`]s over a
//! `tokio::sync::mpsc` channel.  Each event is handled to completion before
//! the next one is read:
//!
//! ```text
//! Event
//!   └─▶ interpreter.handle → Reaction
//!         ├─▶ display.apply(action) for every action
//!         └─▶ synth.speak(dispatch)
//!               └─ Err → fed back as SynthEvent::Failed, queue advances
//!
//! UiEvent::Quit
//!   └─▶ stop reading new commands, keep handling synth events
//!       until the speech queue is idle, then return
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::display::DisplaySink;
use crate::speech::{SpeechSynthesizer, SynthEvent, Utterance};

use super::{Event, Interpreter, UiEvent};

/// Connects an [`Interpreter`] to its synthesizer and display.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use jarvis_voice::config::AppConfig;
/// use jarvis_voice::display::{
///     new_shared_display, ConsoleDisplay, HttpPhotoFetcher,
/// };
/// use jarvis_voice::interpreter::{Interpreter, Orchestrator};
/// use jarvis_voice::speech::ConsoleSynthesizer;
/// use jarvis_voice::wake::SystemClock;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let (tx, rx) = tokio::sync::mpsc::channel(64);
///
/// let interpreter = Interpreter::new(&config, Box::new(SystemClock)).unwrap();
/// let synth = Arc::new(ConsoleSynthesizer::new(tx.clone(), 180));
/// let display = Arc::new(ConsoleDisplay::new(
///     new_shared_display(&config.display, &config.assistant.name),
///     Arc::new(HttpPhotoFetcher::from_config(&config.display)),
///     Box::new(std::io::stdout()),
/// ));
///
/// Orchestrator::new(interpreter, synth, display).run(rx).await;
/// # }
/// ```
pub struct Orchestrator {
    interpreter: Interpreter,
    synth: Arc<dyn SpeechSynthesizer>,
    display: Arc<dyn DisplaySink>,
}

impl Orchestrator {
    pub fn new(
        interpreter: Interpreter,
        synth: Arc<dyn SpeechSynthesizer>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            interpreter,
            synth,
            display,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run until `events` is closed, or until `Quit` was received and all
    /// queued speech has finished.  Returns the interpreter so callers can
    /// inspect its final state.
    pub async fn run(mut self, mut events: mpsc::Receiver<Event>) -> Interpreter {
        let mut quitting = false;

        while let Some(event) = events.recv().await {
            match event {
                Event::Ui(UiEvent::Quit) => {
                    log::info!("interpreter: quit requested, draining speech queue");
                    quitting = true;
                }
                Event::Synth(_) => self.dispatch(event),
                other if quitting => {
                    log::debug!("interpreter: shutting down, ignoring {other:?}");
                }
                other => self.dispatch(other),
            }

            if quitting && self.interpreter.is_speech_idle() {
                break;
            }
        }

        log::info!("interpreter: orchestrator shutting down");
        self.interpreter
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, event: Event) {
        let reaction = self.interpreter.handle(event);
        for action in &reaction.actions {
            self.display.apply(action);
        }
        if let Some(utterance) = reaction.dispatch {
            self.speak(utterance);
        }
    }

    /// Hand `utterance` to the synthesizer.  A device that refuses it is
    /// treated like a playback failure so the queue keeps moving.
    fn speak(&mut self, utterance: Utterance) {
        let mut next = Some(utterance);
        while let Some(utterance) = next.take() {
            if let Err(e) = self.synth.speak(&utterance) {
                log::warn!("interpreter: synthesizer rejected #{}: {e}", utterance.id);
                next = self
                    .interpreter
                    .handle(Event::Synth(SynthEvent::Failed(utterance.id, e)))
                    .dispatch;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
