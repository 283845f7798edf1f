//! Core types for recorded sessions
//!
//! Defines the event record shared by every stage of the refinement pipeline.

use serde::{Deserialize, Serialize};

/// Millisecond timestamp of a recorded event
pub type Millis = i64;

/// Kind of interaction captured in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// Click or tap on an element
    PointerActivation,
    /// Text typed into a field
    TextInput,
    /// Checkbox, switch or other on/off control
    StateToggle,
    /// Any kind this version does not know about
    #[serde(other)]
    Unrecognized,
}

/// Value attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    /// On/off state of a toggle
    Flag(bool),
    /// Text content of a field
    Text(String),
}

/// Interpretation of a record, keyed by its kind.
///
/// A record whose value does not fit its kind (or whose kind is unknown)
/// projects to [`Action::Malformed`] and never contributes to a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Pointer activation, no value
    Activate,
    /// Text input with the typed value
    Type(&'a str),
    /// Toggle with its resulting state
    Toggle(bool),
    /// Shape not understood
    Malformed,
}

/// One captured user interaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventRecord {
    /// Interaction kind
    pub kind: EventKind,
    /// Stable identifier of the element acted upon
    pub target: String,
    /// Value (text for inputs, flag for toggles)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<EventValue>,
    /// Capture time in milliseconds
    #[serde(alias = "recordedAt")]
    pub recorded_at: Millis,
}

impl EventRecord {
    /// Create a pointer activation
    pub fn click(target: impl Into<String>, recorded_at: Millis) -> Self {
        Self {
            kind: EventKind::PointerActivation,
            target: target.into(),
            value: None,
            recorded_at,
        }
    }

    /// Create a text input
    pub fn text_input(target: impl Into<String>, value: impl Into<String>, recorded_at: Millis) -> Self {
        Self {
            kind: EventKind::TextInput,
            target: target.into(),
            value: Some(EventValue::Text(value.into())),
            recorded_at,
        }
    }

    /// Create a state toggle
    pub fn toggle(target: impl Into<String>, on: bool, recorded_at: Millis) -> Self {
        Self {
            kind: EventKind::StateToggle,
            target: target.into(),
            value: Some(EventValue::Flag(on)),
            recorded_at,
        }
    }

    pub fn action(&self) -> Action<'_> {
        match (self.kind, &self.value) {
            (EventKind::PointerActivation, None) => Action::Activate,
            (EventKind::TextInput, Some(EventValue::Text(text))) => Action::Type(text),
            (EventKind::StateToggle, Some(EventValue::Flag(on))) => Action::Toggle(*on),
            _ => Action::Malformed,
        }
    }

    /// Identity key used to re-select records across stages
    pub fn identity(&self) -> (Millis, &str) {
        (self.recorded_at, self.target.as_str())
    }
}
