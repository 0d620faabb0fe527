//! Command routing for an awake assistant.
//!
//! [`CommandRouter::route`] maps every non wake-control [`Intent`] to a
//! non-empty list of [`Action`]s.  It is pure: the same intent always yields
//! the same actions.
//!
//! | Intent         | Actions                                         |
//! |----------------|-------------------------------------------------|
//! | `Help`         | Speak(summary), Log                             |
//! | `ClearText`    | HideText, Speak(ack), Log                       |
//! | `ShowText(p)`  | ShowText(p), Speak(p), Log                      |
//! | `ShowPhoto(q)` | ShowPhoto(q), Speak(announcement), Log          |
//! | `Fallback`     | Speak(ack), Log                                 |

pub mod action;
pub mod replies;

pub use action::{Action, Speaker, VoiceParams};

use crate::intent::Intent;

// ---------------------------------------------------------------------------
// CommandRouter
// ---------------------------------------------------------------------------

/// Turns intents into actions, stamping spoken replies with the configured
/// voice parameters.
#[derive(Debug, Clone, Default)]
pub struct CommandRouter {
    voice: VoiceParams,
}

impl CommandRouter {
    pub fn new(voice: VoiceParams) -> Self {
        Self { voice }
    }

    /// Voice parameters used for every `Speak` this router emits.
    pub fn voice(&self) -> VoiceParams {
        self.voice
    }

    /// Build the actions for `intent`.
    ///
    /// Meant for an awake assistant and intents other than wake/shutdown,
    /// which the wake state machine answers itself.  If one slips through it
    /// is acknowledged like an unrecognised command, so the result is never
    /// empty.
    pub fn route(&self, intent: &Intent) -> Vec<Action> {
        match intent {
            Intent::Help => vec![
                Action::speak(replies::HELP, self.voice),
                Action::log(replies::HELP),
            ],
            Intent::ClearText => vec![
                Action::HideText,
                Action::speak(replies::TEXT_HIDDEN, self.voice),
                Action::log(replies::TEXT_HIDDEN),
            ],
            Intent::ShowText(content) => vec![
                Action::ShowText {
                    content: content.clone(),
                },
                Action::speak(content.clone(), self.voice),
                Action::log(replies::TEXT_SHOWN_LOG),
            ],
            Intent::ShowPhoto(query) => {
                let reply = replies::photo_announcement(query);
                vec![
                    Action::ShowPhoto {
                        query: query.clone(),
                    },
                    Action::speak(reply.clone(), self.voice),
                    Action::log(reply),
                ]
            }
            Intent::Fallback => self.acknowledge(),
            Intent::Wake | Intent::Shutdown => {
                log::warn!("router: {} reached the router, acknowledging", intent.label());
                self.acknowledge()
            }
        }
    }

    fn acknowledge(&self) -> Vec<Action> {
        vec![
            Action::speak(replies::ACKNOWLEDGED, self.voice),
            Action::log(replies::ACKNOWLEDGED),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
