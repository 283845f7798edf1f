//! Short human-readable description of a refined script.

use crate::capture::types::{Action, EventRecord};

/// Phrase for a script that does nothing
pub const NO_ACTIONS: &str = "no actions";

const COMPLETE_TASK: &str = "complete a task";
const FILL_FIELD: &str = "fill a form field";

fn phrase_for(record: &EventRecord) -> Option<&'static str> {
    match record.action() {
        Action::Toggle(true) => Some(COMPLETE_TASK),
        Action::Type(_) => Some(FILL_FIELD),
        Action::Toggle(false) | Action::Activate | Action::Malformed => None,
    }
}

/// Describe what a script does, e.g. "complete a task and fill a form field".
pub fn describe(script: &[EventRecord]) -> String {
    let mut phrases: Vec<&'static str> = Vec::new();
    for phrase in script.iter().filter_map(phrase_for) {
        if !phrases.contains(&phrase) {
            phrases.push(phrase);
        }
    }

    if phrases.is_empty() {
        NO_ACTIONS.to_string()
    } else {
        phrases.join(" and ")
    }
}
