//! # quest-goal
//!
//! Goal tracking with points for Eternal Quest.
//!
//! A [`GoalStore`] holds an ordered list of goals and a running score.
//! Recording an event against a goal awards points according to the goal's
//! kind, and the whole store round-trips through a plain-text goal file.
//!
//! ## Key components
//!
//! - [`GoalVariant`] — per-kind state and scoring (Simple, Eternal, Checklist)
//! - [`GoalRecord`] — name, description, and base points plus one variant
//! - [`GoalStore`] — creation, listing, event recording, score, save/load
//! - [`codec`] — the line-oriented goal-file format
//! - [`QuestEvent`] / [`EventLog`] — JSONL history of what happened
//! - [`QuestConfig`] — file locations under `.quest/`

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod store;

pub use config::QuestConfig;
pub use error::GoalError;
pub use events::{EventLog, QuestEvent};
pub use goal::{ChecklistTerms, EventStep, GoalKind, GoalRecord, GoalVariant};
pub use store::{EventOutcome, GoalStore};
