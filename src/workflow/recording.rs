//! Recording Data Structures
//!
//! Defines the on-disk format for a recorded demonstration session.

use crate::capture::types::EventRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current recording format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Recording metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingMetadata {
    /// Unique recording ID
    pub id: Uuid,
    /// Recording name
    pub name: String,
    /// User-provided goal description
    pub goal: Option<String>,
    /// Recording start time
    pub started_at: DateTime<Utc>,
    /// Recording end time
    pub ended_at: Option<DateTime<Utc>>,
    /// Total event count
    pub event_count: usize,
    /// Recording duration in milliseconds
    pub duration_ms: u64,
    /// Version of the recording format
    pub format_version: String,
}

impl RecordingMetadata {
    /// Create new metadata for a recording
    pub fn new(name: String, goal: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            goal,
            started_at: Utc::now(),
            ended_at: None,
            event_count: 0,
            duration_ms: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }

    /// Finalize the recording with end time and event count
    pub fn finalize(&mut self, event_count: usize, duration_ms: u64) {
        self.ended_at = Some(Utc::now());
        self.event_count = event_count;
        self.duration_ms = duration_ms;
    }
}

impl Default for RecordingMetadata {
    fn default() -> Self {
        Self::new(String::new(), None)
    }
}

/// A complete recording of one demonstration session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// Recording metadata
    #[serde(default)]
    pub metadata: RecordingMetadata,
    /// Event log in capture order
    #[serde(default)]
    pub events: Vec<EventRecord>,
}

impl Recording {
    /// Create a new empty recording
    pub fn new(name: String, goal: Option<String>) -> Self {
        Self {
            metadata: RecordingMetadata::new(name, goal),
            events: Vec::new(),
        }
    }

    /// Wrap a bare event log
    pub fn from_events(name: String, events: Vec<EventRecord>) -> Self {
        let mut recording = Self::new(name, None);
        recording.events = events;
        let duration = recording.span_ms();
        recording.finalize(duration);
        recording
    }

    /// Add an event to the recording
    pub fn add_event(&mut self, event: EventRecord) {
        self.events.push(event);
    }

    /// Finalize the recording
    pub fn finalize(&mut self, duration_ms: u64) {
        self.metadata.finalize(self.events.len(), duration_ms);
    }

    /// Milliseconds between the earliest and latest event
    pub fn span_ms(&self) -> u64 {
        let times = self.events.iter().map(|e| e.recorded_at);
        match (times.clone().min(), times.max()) {
            (Some(first), Some(last)) => last.saturating_sub(first).max(0) as u64,
            _ => 0,
        }
    }

    /// Save recording to a file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load recording from a file.
    ///
    /// Accepts either a full recording or a bare JSON array of event records.
    /// Logs a warning if the recording was saved with an unknown format version.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;

        if value.is_array() {
            let events: Vec<EventRecord> = serde_json::from_value(value)?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "untitled".to_string());
            return Ok(Self::from_events(name, events));
        }
        if !value.is_object() {
            return Err(crate::Error::Recording(format!(
                "{} is neither a recording nor an event list",
                path.display()
            )));
        }

        let recording: Recording = serde_json::from_value(value)?;
        if recording.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %recording.metadata.name,
                found = %recording.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Recording has different format version; some fields may use default values"
            );
        }
        Ok(recording)
    }

    /// Get the number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if recording is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for Recording {
    fn default() -> Self {
        Self::new("untitled".to_string(), None)
    }
}
