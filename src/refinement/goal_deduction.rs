//! Goal Deduction
//!
//! Reduces a session log to its terminal state: the tasks left completed and
//! the form fields left holding a settled value.

use crate::capture::types::{Action, EventRecord};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Prefix marking checklist items in the default naming scheme
pub const DEFAULT_TASK_PREFIX: &str = "task-";

/// Decides whether a target identifier denotes a checklist task.
pub trait TargetClassifier {
    fn is_task(&self, target: &str) -> bool;
}

impl<F> TargetClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_task(&self, target: &str) -> bool {
        self(target)
    }
}

/// Classifies targets by a leading prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixClassifier {
    prefix: String,
}

impl PrefixClassifier {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for PrefixClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TASK_PREFIX)
    }
}

impl TargetClassifier for PrefixClassifier {
    fn is_task(&self, target: &str) -> bool {
        target.starts_with(&self.prefix)
    }
}

/// Final observed outcome of a session
///
/// Equality compares the outcome only; `deduced_at` is ignored.
#[derive(Debug, Clone)]
pub struct TerminalState {
    completed_tasks: BTreeSet<String>,
    form_values: BTreeMap<String, String>,
    /// Wall-clock time of deduction. Informational only.
    deduced_at: DateTime<Utc>,
}

impl TerminalState {
    /// Targets whose last toggle left them on
    pub fn completed_tasks(&self) -> &BTreeSet<String> {
        &self.completed_tasks
    }

    /// Settled (trimmed, non-empty) text per target
    pub fn form_values(&self) -> &BTreeMap<String, String> {
        &self.form_values
    }

    pub fn deduced_at(&self) -> DateTime<Utc> {
        self.deduced_at
    }

    pub fn is_completed(&self, target: &str) -> bool {
        self.completed_tasks.contains(target)
    }

    pub fn form_value(&self, target: &str) -> Option<&str> {
        self.form_values.get(target).map(String::as_str)
    }

    /// Union of completed tasks and form field targets
    pub fn necessary_targets(&self) -> BTreeSet<&str> {
        self.completed_tasks
            .iter()
            .chain(self.form_values.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.completed_tasks.is_empty() && self.form_values.is_empty()
    }
}

impl PartialEq for TerminalState {
    fn eq(&self, other: &Self) -> bool {
        self.completed_tasks == other.completed_tasks && self.form_values == other.form_values
    }
}

impl Eq for TerminalState {}

/// Deduce the terminal state of a session log.
///
/// The latest record per target decides its outcome. On equal timestamps the
/// record appearing later in the log wins.
pub fn deduce_goal<C>(log: &[EventRecord], classifier: &C) -> TerminalState
where
    C: TargetClassifier + ?Sized,
{
    let mut last_seen: HashMap<&str, &EventRecord> = HashMap::new();
    for record in log {
        let supersedes = last_seen
            .get(record.target.as_str())
            .map_or(true, |current| record.recorded_at >= current.recorded_at);
        if supersedes {
            last_seen.insert(record.target.as_str(), record);
        }
    }

    let mut completed_tasks = BTreeSet::new();
    let mut form_values = BTreeMap::new();

    for (target, record) in last_seen {
        match record.action() {
            Action::Toggle(true) if classifier.is_task(target) => {
                completed_tasks.insert(target.to_string());
            }
            Action::Type(text) if !text.trim().is_empty() => {
                form_values.insert(target.to_string(), text.trim().to_string());
            }
            Action::Toggle(_) | Action::Type(_) | Action::Activate | Action::Malformed => {}
        }
    }

    debug!(
        events = log.len(),
        completed_tasks = completed_tasks.len(),
        form_values = form_values.len(),
        "Deduced terminal state"
    );

    TerminalState {
        completed_tasks,
        form_values,
        deduced_at: Utc::now(),
    }
}
