// config.rs — Where a quest keeps its files.
//
// `for_project()` lays everything out under `<root>/.quest/`. `load()` also
// reads `<root>/.quest/config.toml` when it exists; every key is optional and
// relative paths are taken from the project root.
//
//   goals_file = "my-goals.txt"
//   events_log = "/var/log/quest.jsonl"
//   record_events = false

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Resolved file locations for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestConfig {
    /// The goal file read and written by the driver.
    pub goals_file: PathBuf,

    /// JSONL event log.
    pub events_log: PathBuf,

    /// Append events to `events_log`.
    pub record_events: bool,
}

/// On-disk shape of `.quest/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    goals_file: Option<PathBuf>,
    events_log: Option<PathBuf>,
    record_events: Option<bool>,
}

impl QuestConfig {
    /// Default `.quest/` layout for a project.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let quest_dir = Self::quest_dir(project_root.as_ref());
        Self {
            goals_file: quest_dir.join("goals.txt"),
            events_log: quest_dir.join("events.jsonl"),
            record_events: true,
        }
    }

    /// Defaults overlaid with `.quest/config.toml`, if present.
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self, GoalError> {
        let root = project_root.as_ref();
        let mut config = Self::for_project(root);

        let path = Self::quest_dir(root).join("config.toml");
        if !path.exists() {
            return Ok(config);
        }

        let content = fs::read_to_string(&path).map_err(|source| GoalError::StorageUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| GoalError::ConfigError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if let Some(goals_file) = file.goals_file {
            config.goals_file = root.join(goals_file);
        }
        if let Some(events_log) = file.events_log {
            config.events_log = root.join(events_log);
        }
        if let Some(record_events) = file.record_events {
            config.record_events = record_events;
        }

        tracing::debug!(path = %path.display(), "loaded quest config");
        Ok(config)
    }

    fn quest_dir(root: &Path) -> PathBuf {
        root.join(".quest")
    }
}
