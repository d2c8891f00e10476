// events.rs — Quest events and the JSONL event log.
//
// The driver records an event whenever a goal is created, an accomplishment
// is recorded, or the goal file is saved or loaded. The log at
// `.quest/events.jsonl` keeps the history the single score in the goal file
// can't: which goal earned which points, and when.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::QuestConfig;
use crate::error::GoalError;
use crate::goal::GoalKind;
use crate::store::{EventOutcome, GoalStore};

/// Events emitted at key points of a quest session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A goal was appended to the store.
    GoalCreated {
        index: usize,
        name: String,
        kind: GoalKind,
        timestamp: DateTime<Utc>,
    },

    /// An accomplishment was recorded against a goal.
    EventRecorded {
        index: usize,
        name: String,
        points_awarded: i64,
        completed: bool,
        score: i64,
        timestamp: DateTime<Utc>,
    },

    /// The store was written to a goal file.
    GoalsSaved {
        path: String,
        goal_count: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },

    /// The store was replaced from a goal file.
    GoalsLoaded {
        path: String,
        goal_count: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::GoalCreated { .. } => "goal_created",
            QuestEvent::EventRecorded { .. } => "event_recorded",
            QuestEvent::GoalsSaved { .. } => "goals_saved",
            QuestEvent::GoalsLoaded { .. } => "goals_loaded",
        }
    }

    pub fn goal_created(index: usize, name: &str, kind: GoalKind) -> Self {
        QuestEvent::GoalCreated {
            index,
            name: name.to_string(),
            kind,
            timestamp: Utc::now(),
        }
    }

    pub fn event_recorded(index: usize, name: &str, outcome: EventOutcome, score: i64) -> Self {
        QuestEvent::EventRecorded {
            index,
            name: name.to_string(),
            points_awarded: outcome.points_awarded,
            completed: outcome.completed,
            score,
            timestamp: Utc::now(),
        }
    }

    pub fn goals_saved(path: &Path, store: &GoalStore) -> Self {
        QuestEvent::GoalsSaved {
            path: path.display().to_string(),
            goal_count: store.len(),
            score: store.score(),
            timestamp: Utc::now(),
        }
    }

    pub fn goals_loaded(path: &Path, store: &GoalStore) -> Self {
        QuestEvent::GoalsLoaded {
            path: path.display().to_string(),
            goal_count: store.len(),
            score: store.score(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only JSONL history of a quest session.
///
/// Each event is one line. A disabled log accepts events and drops them, so
/// callers don't branch on `record_events`.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// The log described by `config`: its `events_log`, unless turned off.
    pub fn for_config(config: &QuestConfig) -> Self {
        if config.record_events {
            Self::open(&config.events_log)
        } else {
            Self::disabled()
        }
    }

    /// Write `event` as one line, creating the log and its directory on
    /// first use.
    pub fn append(&self, event: &QuestEvent) -> Result<(), GoalError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let unavailable = |source| GoalError::StorageUnavailable {
            path: path.display().to_string(),
            source,
        };

        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(unavailable)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(unavailable)
    }

    /// Like [`EventLog::append`], but a failure is only logged. History is
    /// secondary to the goal file and never fails a command.
    pub fn record(&self, event: &QuestEvent) {
        if let Err(e) = self.append(event) {
            tracing::warn!(event = event.event_type(), "event log error: {}", e);
        }
    }
}
