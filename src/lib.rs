//! Jarvis: a Dutch voice command interpreter.
//!
//! Final transcripts from a speech recognizer are normalized, classified
//! into an [`intent::Intent`], gated by the wake/sleep state machine and
//! routed to display and speech actions.  Spoken replies play strictly one
//! at a time through [`speech::SpeechQueue`].
//!
//! The [`interpreter::Interpreter`] ties the pieces together and is driven
//! by [`interpreter::Orchestrator`] from a tokio event channel.

pub mod config;
pub mod display;
pub mod intent;
pub mod interpreter;
pub mod router;
pub mod speech;
pub mod transcript;
pub mod wake;
