//! Capture Module
//!
//! Event records as produced by a recording session.

pub mod types;

pub use types::{Action, EventKind, EventRecord, EventValue, Millis};
