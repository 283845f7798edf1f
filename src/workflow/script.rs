//! Replay Script
//!
//! The persisted result of refining a recording: the minimal ordered steps
//! plus enough metadata to trace them back to their source session.

use super::recording::Recording;
use crate::capture::types::EventRecord;
use crate::refinement::{describe, ScriptRefiner, TargetClassifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Script metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptMetadata {
    /// Unique script ID
    pub id: Uuid,
    /// ID of the recording this script was refined from
    pub source_recording: Uuid,
    /// Script name
    pub name: String,
    /// Generation time
    pub generated_at: DateTime<Utc>,
    /// Number of events in the source recording
    pub source_event_count: usize,
    /// Number of steps kept
    pub step_count: usize,
}

/// A refined, replayable script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    pub metadata: ScriptMetadata,
    /// One-line description of what the script does
    pub summary: String,
    /// Steps in replay order
    pub steps: Vec<EventRecord>,
}

impl ReplayScript {
    /// Refine a recording into a script
    pub fn from_recording<C: TargetClassifier>(recording: &Recording, refiner: &ScriptRefiner<C>) -> Self {
        let steps = refiner.refine(&recording.events);
        let summary = describe(&steps);

        info!(
            recording = %recording.metadata.name,
            events = recording.len(),
            steps = steps.len(),
            "Refined recording into replay script"
        );

        Self {
            metadata: ScriptMetadata {
                id: Uuid::new_v4(),
                source_recording: recording.metadata.id,
                name: recording.metadata.name.clone(),
                generated_at: Utc::now(),
                source_event_count: recording.len(),
                step_count: steps.len(),
            },
            summary,
            steps,
        }
    }

    /// Rename the script
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = name.into();
        self
    }

    /// Fraction of source events that were dropped (0.0 for an empty source)
    pub fn reduction_ratio(&self) -> f64 {
        if self.metadata.source_event_count == 0 {
            return 0.0;
        }
        1.0 - self.steps.len() as f64 / self.metadata.source_event_count as f64
    }

    /// File name for saving under a scripts directory.
    ///
    /// Path separators and leading dots are dropped from the script name; a
    /// name with nothing left falls back to the source recording ID.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .metadata
            .name
            .chars()
            .filter(|c| !std::path::is_separator(*c))
            .collect();
        let stem = stem.trim().trim_start_matches('.');
        if stem.is_empty() {
            format!("{}.json", self.metadata.source_recording)
        } else {
            format!("{}.json", stem)
        }
    }

    /// An empty script means nothing in the session was worth keeping
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Save script as JSON
    pub fn save(&self, path: &Path, pretty: bool) -> crate::Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load script from a file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
