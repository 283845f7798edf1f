//! Backward Tracing
//!
//! Walks a session log against its terminal state and picks, for every
//! necessary target, the record that produced the target's final value.

use super::goal_deduction::TerminalState;
use crate::capture::types::{Action, EventKind, EventRecord};
use std::collections::HashMap;
use tracing::debug;

/// Records causally required to reach a goal, in chronological order
pub type KeepList = Vec<EventRecord>;

/// Check whether a record reproduces the goal value of its target.
///
/// Only a toggle switching on can complete a task. Text comparison is exact;
/// the goal holds the trimmed value, so a record typed with surrounding
/// whitespace does not match.
fn matches_goal(record: &EventRecord, goal: &TerminalState) -> bool {
    match record.kind {
        EventKind::StateToggle => {
            record.action() == Action::Toggle(true) && goal.is_completed(&record.target)
        }
        EventKind::TextInput => match (record.action(), goal.form_value(&record.target)) {
            (Action::Type(text), Some(expected)) => text == expected,
            _ => false,
        },
        EventKind::PointerActivation | EventKind::Unrecognized => false,
    }
}

/// Select the producing record for each necessary target.
///
/// A candidate replaces the current best only when it is strictly newer and
/// matches the goal. A later non-matching record therefore leaves an earlier
/// match in place instead of dropping the target.
pub fn trace_back(log: &[EventRecord], goal: &TerminalState) -> KeepList {
    let necessary = goal.necessary_targets();
    // target -> log position of best candidate
    let mut best: HashMap<&str, usize> = HashMap::new();

    for (position, record) in log.iter().enumerate() {
        let target = record.target.as_str();
        if !necessary.contains(target) {
            continue;
        }
        let newer = best
            .get(target)
            .map_or(true, |&current| record.recorded_at > log[current].recorded_at);
        if newer && matches_goal(record, goal) {
            best.insert(target, position);
        }
    }

    let mut positions: Vec<usize> = best.into_values().collect();
    positions.sort_by_key(|&position| (log[position].recorded_at, position));

    let unreached = necessary.len() - positions.len();
    if unreached > 0 {
        debug!(unreached, "Goal targets without a matching record");
    }
    debug!(kept = positions.len(), "Traced keep-list");

    positions.into_iter().map(|position| log[position].clone()).collect()
}
