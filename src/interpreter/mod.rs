//! The voice command interpreter.
//!
//! [`Interpreter`] owns everything that changes over a session: the wake
//! state, the speech queue and the selected voice.  It is synchronous and
//! deterministic: feed it the same [`Event`] sequence (with the same clock)
//! and it returns the same [`Reaction`]s.  [`Orchestrator`] wraps it in a
//! tokio task and connects it to the synthesizer and display.
//!
//! # Event flow
//!
//! ```text
//! Recognizer Transcript(final)
//!   └─▶ normalize → classify → WakeStateMachine.handle → actions
//!         └─▶ every Speak is enqueued; first one may dispatch now
//! Synth Ended / Failed
//!   └─▶ SpeechQueue advances → next utterance to dispatch
//! Ui buttons
//!   └─▶ clear actions, regardless of wake state
//! ```

pub mod event;
pub mod runner;

pub use event::{Event, RecognitionError, RecognizerEvent, UiEvent};
pub use runner::Orchestrator;

use thiserror::Error;

use crate::config::AppConfig;
use crate::intent::{IntentMatcher, MatcherError};
use crate::router::{replies, Action, CommandRouter, VoiceParams};
use crate::speech::{select_voice, SpeechQueue, SynthEvent, Utterance, VoiceInfo};
use crate::transcript::normalize;
use crate::wake::{AssistantState, Clock, WakeStateMachine};

// ---------------------------------------------------------------------------
// InterpreterError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum InterpreterError {
    /// The intent patterns could not be built from the configured name.
    #[error("cannot build intent patterns: {0}")]
    Matcher(#[from] MatcherError),
}

// ---------------------------------------------------------------------------
// Reaction
// ---------------------------------------------------------------------------

/// What one event produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reaction {
    /// Actions for the display sink, in order.  `Speak` actions are included
    /// for observers; the interpreter has already queued them.
    pub actions: Vec<Action>,
    /// Utterance to hand to the synthesizer now, if the queue advanced.
    pub dispatch: Option<Utterance>,
}

impl Reaction {
    fn with_actions(actions: Vec<Action>) -> Self {
        Self {
            actions,
            dispatch: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Interpreter {
    assistant_name: String,
    matcher: IntentMatcher,
    wake: WakeStateMachine,
    speech: SpeechQueue,
    voice: VoiceParams,
    preferred_languages: Vec<String>,
}

impl Interpreter {
    /// Build an interpreter in the sleeping state with an empty speech queue.
    pub fn new(config: &AppConfig, clock: Box<dyn Clock>) -> Result<Self, InterpreterError> {
        let matcher = IntentMatcher::new(&config.assistant.name)?;
        let voice = VoiceParams {
            rate: config.speech.rate,
            pitch: config.speech.pitch,
        };

        Ok(Self {
            assistant_name: config.assistant.name.clone(),
            matcher,
            wake: WakeStateMachine::new(CommandRouter::new(voice), clock),
            speech: SpeechQueue::new(config.assistant.language.clone()),
            voice,
            preferred_languages: config.speech.preferred_languages.clone(),
        })
    }

    pub fn state(&self) -> AssistantState {
        self.wake.state()
    }

    /// Nothing is playing and nothing is waiting to play.
    pub fn is_speech_idle(&self) -> bool {
        self.speech.is_idle()
    }

    pub fn speech(&self) -> &SpeechQueue {
        &self.speech
    }

    /// Process one event to completion.
    pub fn handle(&mut self, event: Event) -> Reaction {
        match event {
            Event::Recognizer(e) => self.on_recognizer(e),
            Event::Synth(e) => self.on_synth(e),
            Event::Ui(e) => self.on_ui(e),
        }
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    fn on_recognizer(&mut self, event: RecognizerEvent) -> Reaction {
        match event {
            RecognizerEvent::Started => {
                log::debug!("interpreter: recognizer listening");
                Reaction::with_actions(vec![Action::SetListening { listening: true }])
            }
            RecognizerEvent::Ended => {
                log::debug!("interpreter: recognizer session ended");
                Reaction::with_actions(vec![Action::SetListening { listening: false }])
            }
            RecognizerEvent::Transcript {
                is_final: false, ..
            } => Reaction::default(),
            RecognizerEvent::Transcript {
                text,
                is_final: true,
            } => self.on_transcript(&text),
            RecognizerEvent::Error(e) => self.on_recognition_error(e),
        }
    }

    fn on_transcript(&mut self, raw: &str) -> Reaction {
        let transcript = normalize(raw);
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Reaction::default();
        }

        let intent = self.matcher.classify(transcript);
        log::debug!(
            "interpreter: {:?} → {} ({})",
            transcript,
            intent.label(),
            self.wake.state().label()
        );

        let actions = self.wake.handle(&intent);
        if actions.is_empty() {
            return Reaction::default();
        }

        let mut all = Vec::with_capacity(actions.len() + 1);
        all.push(Action::heard(transcript));
        all.extend(actions);
        self.react(all)
    }

    fn on_recognition_error(&mut self, error: RecognitionError) -> Reaction {
        log::warn!("interpreter: {error}");
        match error {
            RecognitionError::Unavailable => self.react(vec![
                Action::log(replies::RECOGNITION_UNAVAILABLE),
                Action::speak(replies::RECOGNITION_UNAVAILABLE, self.voice),
            ]),
            RecognitionError::Microphone(_) => self.react(vec![
                Action::SetListening { listening: false },
                Action::log(replies::MICROPHONE_FAILED),
            ]),
            RecognitionError::Session(message) => {
                self.react(vec![Action::log(replies::recognition_error(&message))])
            }
        }
    }

    fn on_synth(&mut self, event: SynthEvent) -> Reaction {
        let dispatch = match event {
            SynthEvent::Started(id) => {
                self.speech.on_start(id);
                None
            }
            SynthEvent::Ended(id) => self.speech.on_end(id),
            SynthEvent::Failed(id, e) => {
                log::warn!("interpreter: utterance #{id} failed: {e}");
                self.speech.on_error(id)
            }
            SynthEvent::VoicesChanged(voices) => {
                self.select_voice(&voices);
                None
            }
        };
        Reaction {
            actions: Vec::new(),
            dispatch,
        }
    }

    /// An empty voice list keeps the current selection.
    fn select_voice(&mut self, voices: &[VoiceInfo]) {
        let Some(chosen) = select_voice(voices, &self.preferred_languages) else {
            log::info!(
                "interpreter: no synthesizer voices offered, keeping {:?}",
                self.speech.voice()
            );
            return;
        };
        log::info!("interpreter: using voice {} ({})", chosen.name, chosen.lang);
        self.speech.set_voice(Some(chosen.name.clone()));
    }

    fn on_ui(&mut self, event: UiEvent) -> Reaction {
        match event {
            UiEvent::Start => {
                let notice = replies::microphone_ready(&self.assistant_name);
                self.react(vec![
                    Action::speak(notice.clone(), self.voice),
                    Action::log(notice),
                ])
            }
            UiEvent::ClearText => Reaction::with_actions(vec![Action::HideText]),
            UiEvent::ClearPhotos => Reaction::with_actions(vec![Action::ClearPhotos]),
            UiEvent::ClearLog => Reaction::with_actions(vec![Action::ClearLog]),
            UiEvent::Quit => Reaction::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Queue every `Speak` in `actions` and return them with whatever the
    /// queue wants dispatched.
    fn react(&mut self, actions: Vec<Action>) -> Reaction {
        let mut dispatch = None;
        for action in &actions {
            if let Action::Speak { text, rate, pitch } = action {
                if let Some(utterance) = self.speech.enqueue(text.clone(), *rate, *pitch) {
                    dispatch = Some(utterance);
                }
            }
        }
        Reaction { actions, dispatch }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
