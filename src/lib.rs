//! # Replay Refiner
//!
//! Turns the event log of a recorded UI demonstration into the minimal script
//! that reproduces the session's final outcome.
//!
//! ## Quick Start
//!
//! ```
//! use replay_refiner::{refine, describe, EventRecord};
//!
//! let log = vec![
//!     EventRecord::text_input("name", "Bob", 1),
//!     EventRecord::text_input("name", "Bob and Alice", 2),
//!     EventRecord::text_input("name", "Bob", 3),
//!     EventRecord::click("save", 4),
//!     EventRecord::toggle("task-1", true, 5),
//! ];
//!
//! let script = refine(&log);
//! assert_eq!(script.len(), 2);
//! assert_eq!(describe(&script), "fill a form field and complete a task");
//! ```
//!
//! ## Architecture
//!
//! - [`capture`]: Event records and their value classification
//! - [`refinement`]: Goal deduction, backward tracing, noise pruning
//! - [`workflow`]: Persisted recordings and replay scripts
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Raw Log   │───▶│    Goal     │───▶│  Backward   │───▶│    Noise    │
//! │             │    │  Deduction  │    │   Tracing   │    │   Pruning   │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//!                                                          ┌─────────────┐
//!                                                          │   Refined   │
//!                                                          │   Script    │
//!                                                          └─────────────┘
//! ```

pub mod capture;
pub mod refinement;
pub mod workflow;
pub mod app;

// Re-export commonly used types
pub use capture::types::{Action, EventKind, EventRecord, EventValue};
pub use refinement::{describe, refine, RefinedScript, ScriptRefiner, TargetClassifier, TerminalState};
pub use workflow::{Recording, ReplayScript};

/// Result type alias for the replay refiner
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the replay refiner
///
/// The refinement pipeline itself never fails; these cover the shell around it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Recording error: {0}")]
    Recording(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
