//! Refinement Pipeline
//!
//! Reduces a raw session log to the minimal script that reaches the same
//! final outcome:
//!
//! ```text
//! raw log ──▶ goal deduction ──▶ backward tracing ──▶ noise pruning ──▶ refined script
//! ```
//!
//! Every stage is pure and synchronous. Stages re-select records from the raw
//! log by identity key (`recorded_at`, `target`) rather than sharing
//! references, so independent sessions can be refined in parallel.

pub mod backward_trace;
pub mod goal_deduction;
pub mod noise_pruning;
pub mod summary;

pub use backward_trace::{trace_back, KeepList};
pub use goal_deduction::{deduce_goal, PrefixClassifier, TargetClassifier, TerminalState};
pub use noise_pruning::{prune_noise, RefinedScript};
pub use summary::describe;

use crate::capture::types::EventRecord;
use tracing::debug;

/// Runs the three refinement stages with an injected task classifier
#[derive(Debug, Clone, Default)]
pub struct ScriptRefiner<C = PrefixClassifier> {
    classifier: C,
}

impl ScriptRefiner {
    /// Create with the default `task-` prefix classifier
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: TargetClassifier> ScriptRefiner<C> {
    /// Create with a custom classifier
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Refine a session log into its minimal script.
    pub fn refine(&self, log: &[EventRecord]) -> RefinedScript {
        if log.is_empty() {
            return RefinedScript::new();
        }
        let (script, _) = self.run(log);
        script
    }

    /// Refine a log and also return the deduced goal.
    ///
    /// Returns `None` for the goal when the log is empty, since no stage runs.
    pub fn refine_with_goal(&self, log: &[EventRecord]) -> (RefinedScript, Option<TerminalState>) {
        if log.is_empty() {
            return (RefinedScript::new(), None);
        }
        let (script, goal) = self.run(log);
        (script, Some(goal))
    }

    fn run(&self, log: &[EventRecord]) -> (RefinedScript, TerminalState) {
        let goal = deduce_goal(log, &self.classifier);
        let keep = trace_back(log, &goal);
        let script = prune_noise(log, &keep);
        debug!(events = log.len(), steps = script.len(), "Refined session log");
        (script, goal)
    }
}

/// Refine a log with the default classifier.
pub fn refine(log: &[EventRecord]) -> RefinedScript {
    ScriptRefiner::new().refine(log)
}
