// error.rs — Error types for goal creation, scoring, and persistence.

use thiserror::Error;

/// Errors that can occur while building, scoring, or persisting goals.
#[derive(Debug, Error)]
pub enum GoalError {
    /// The requested goal kind is not one of simple, eternal, or checklist.
    #[error("invalid goal kind: {0}")]
    InvalidGoalKind(String),

    /// A creation argument was missing or unusable.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// The store holds no goals yet.
    #[error("no goals available")]
    NoGoals,

    /// An event was recorded against a goal number that doesn't exist.
    #[error("invalid goal number {index} (expected 1..={count})")]
    InvalidIndex { index: usize, count: usize },

    /// Recording an event would push a counter, the points, or the score
    /// past its numeric range. Nothing was changed.
    #[error("{what} would overflow")]
    Overflow { what: String },

    /// A line of the goal file could not be decoded.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The goal file (or event log) could not be read or written.
    #[error("storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize an event for the event log.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The config file exists but could not be parsed.
    #[error("invalid config at {path}: {reason}")]
    ConfigError { path: String, reason: String },
}
