//! Transcript normalization.
//!
//! Every final transcript delivered by the recognizer passes through
//! [`normalize`] exactly once before intent matching.

pub mod normalize;

pub use normalize::normalize;
