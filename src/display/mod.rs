//! Display side of the interpreter.
//!
//! * [`DisplaySink`]: receives every action the interpreter emits.
//! * [`DisplayState`]: text panel, photo grid, log and status indicators.
//! * [`PhotoFetcher`] / [`HttpPhotoFetcher`]: photo lookup with placeholder
//!   fallback.
//! * [`ConsoleDisplay`]: JSON-lines sink used by the console binary.

pub mod console;
pub mod photo;
pub mod state;

pub use console::ConsoleDisplay;
pub use photo::{resolve_photo, HttpPhotoFetcher, PhotoError, PhotoFetcher, PhotoTile};
pub use state::{new_shared_display, DisplayState, LogEntry, SharedDisplay};

use crate::router::Action;

/// One-way consumer of interpreter actions.
///
/// `apply` must not block; slow work such as photo fetches is spawned.
pub trait DisplaySink: Send + Sync {
    fn apply(&self, action: &Action);
}
