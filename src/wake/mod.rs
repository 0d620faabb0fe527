//! Wake/sleep state machine.
//!
//! [`WakeStateMachine`] owns the [`AssistantState`] and is the gate every
//! intent passes through:
//!
//! ```text
//!              Wake (greeting)
//!   Sleeping ───────────────────▶ Awake ──┐ other intents
//!      ▲  │                        │  ▲   │ → CommandRouter
//!      │  └─┐ Shutdown             │  └───┘
//!      │    │ "already asleep"     │ Wake → "already active"
//!      │◀───┘                      │
//!      └───────────────────────────┘
//!              Shutdown (farewell)
//!
//!   Sleeping + other intents → dropped, no actions
//! ```

pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::intent::Intent;
use crate::router::{replies, Action, CommandRouter};

// ---------------------------------------------------------------------------
// AssistantState
// ---------------------------------------------------------------------------

/// Whether the assistant is processing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantState {
    /// Only wake/shutdown phrases are answered.
    Sleeping,
    /// Every intent is routed.
    Awake,
}

impl AssistantState {
    pub fn is_awake(&self) -> bool {
        matches!(self, AssistantState::Awake)
    }

    /// Status text for the awake indicator.
    pub fn label(&self) -> &'static str {
        match self {
            AssistantState::Sleeping => "Slaapstand",
            AssistantState::Awake => "Actief",
        }
    }
}

impl Default for AssistantState {
    fn default() -> Self {
        AssistantState::Sleeping
    }
}

// ---------------------------------------------------------------------------
// WakeStateMachine
// ---------------------------------------------------------------------------

/// Holds the assistant state and turns intents into actions.
pub struct WakeStateMachine {
    state: AssistantState,
    router: CommandRouter,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for WakeStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WakeStateMachine")
            .field("state", &self.state)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl WakeStateMachine {
    /// Start in [`AssistantState::Sleeping`].
    pub fn new(router: CommandRouter, clock: Box<dyn Clock>) -> Self {
        Self {
            state: AssistantState::Sleeping,
            router,
            clock,
        }
    }

    pub fn state(&self) -> AssistantState {
        self.state
    }

    /// Apply one intent and return the resulting actions.
    ///
    /// Returns an empty list only for non wake-control intents while
    /// sleeping.
    pub fn handle(&mut self, intent: &Intent) -> Vec<Action> {
        let voice = self.router.voice();
        match (self.state, intent) {
            (AssistantState::Sleeping, Intent::Wake) => {
                self.state = AssistantState::Awake;
                log::info!("wake: Sleeping → Awake");
                let greeting = format!(
                    "{} {}",
                    replies::salutation(self.clock.hour()),
                    replies::AWAKE_SUFFIX
                );
                vec![
                    Action::SetAwake { awake: true },
                    Action::speak(greeting, voice),
                    Action::log(replies::AWAKE_LOG),
                ]
            }
            (AssistantState::Awake, Intent::Wake) => {
                vec![Action::speak(replies::ALREADY_AWAKE, voice)]
            }
            (AssistantState::Awake, Intent::Shutdown) => {
                self.state = AssistantState::Sleeping;
                log::info!("wake: Awake → Sleeping");
                vec![
                    Action::SetAwake { awake: false },
                    Action::speak(replies::SLEEP, voice),
                    Action::log(replies::SLEEP_LOG),
                ]
            }
            (AssistantState::Sleeping, Intent::Shutdown) => {
                vec![Action::speak(replies::ALREADY_ASLEEP, voice)]
            }
            (AssistantState::Sleeping, other) => {
                log::debug!("wake: sleeping, dropping {}", other.label());
                Vec::new()
            }
            (AssistantState::Awake, other) => self.router.route(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
