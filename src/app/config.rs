//! Configuration Management

use crate::refinement::goal_deduction::{PrefixClassifier, DEFAULT_TASK_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Refinement settings
    #[serde(default)]
    pub refine: RefineConfig,
    /// Storage locations
    #[serde(default)]
    pub storage: StorageConfig,
    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,
}

/// Refinement configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefineConfig {
    /// Target prefix identifying checklist tasks
    pub task_prefix: String,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding recorded sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions_dir: Option<PathBuf>,
    /// Directory receiving refined scripts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts_dir: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print written JSON
    pub pretty_json: bool,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            task_prefix: DEFAULT_TASK_PREFIX.to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

impl RefineConfig {
    /// Build the task classifier described by this config
    pub fn classifier(&self) -> PrefixClassifier {
        PrefixClassifier::new(self.task_prefix.clone())
    }
}

impl Config {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.refine.task_prefix.trim().is_empty() {
            return Err(crate::Error::Config("task_prefix must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Base directory for all application data
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".replay_refiner"))
            .unwrap_or_else(|| PathBuf::from(".replay_refiner"))
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Config path to use: the explicit one if given, else the default
    pub fn resolve_path(explicit: Option<&PathBuf>) -> PathBuf {
        explicit.cloned().unwrap_or_else(Self::default_path)
    }

    /// Directory holding recorded sessions
    pub fn sessions_dir(&self) -> PathBuf {
        self.storage
            .sessions_dir
            .clone()
            .unwrap_or_else(|| Self::home_dir().join("sessions"))
    }

    /// Directory receiving refined scripts
    pub fn scripts_dir(&self) -> PathBuf {
        self.storage
            .scripts_dir
            .clone()
            .unwrap_or_else(|| Self::home_dir().join("scripts"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
