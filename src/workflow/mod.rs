//! Workflow Module
//!
//! Persisted sessions and the replay scripts refined from them.

pub mod recording;
pub mod script;

pub use recording::{Recording, RecordingMetadata};
pub use script::{ReplayScript, ScriptMetadata};
