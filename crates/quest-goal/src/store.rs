// store.rs — GoalStore: the ordered goal list and the running score.
//
// The score is an accumulator. It only moves inside `record_event` (or is
// replaced by a load) and is never recomputed from goal state: an eternal
// goal's history can't be rebuilt from its counter once points changed.
//
// Goals are addressed by 1-based position, which is what the driver shows.

use std::fs;
use std::path::Path;

use crate::codec;
use crate::error::GoalError;
use crate::goal::{ChecklistTerms, GoalKind, GoalRecord, GoalVariant};

/// Characters the goal file uses as separators. Free text can't contain them.
const RESERVED_CHARS: [char; 4] = [',', ':', '\n', '\r'];

/// Result of recording one event against a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    pub points_awarded: i64,
    /// Whether the goal is complete after this event.
    pub completed: bool,
}

/// In-memory goal list plus cumulative score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalStore {
    goals: Vec<GoalRecord>,
    score: i64,
}

impl GoalStore {
    /// Create an empty store with a score of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new goal and return its 1-based index.
    ///
    /// Checklist goals need `checklist` terms with a non-zero target; the
    /// terms are ignored for the other kinds. Nothing is appended on error.
    pub fn create(
        &mut self,
        kind: GoalKind,
        name: &str,
        description: &str,
        base_points: i64,
        checklist: Option<ChecklistTerms>,
    ) -> Result<usize, GoalError> {
        check_free_text("name", name)?;
        check_free_text("description", description)?;

        let variant = match kind {
            GoalKind::Simple => GoalVariant::simple(),
            GoalKind::Eternal => GoalVariant::eternal(),
            GoalKind::Checklist => {
                let terms = checklist.ok_or_else(|| GoalError::InvalidField {
                    field: "target".to_string(),
                    reason: "checklist goals need a target and a bonus".to_string(),
                })?;
                if terms.target == 0 {
                    return Err(GoalError::InvalidField {
                        field: "target".to_string(),
                        reason: "must be at least 1".to_string(),
                    });
                }
                GoalVariant::checklist(terms)
            }
        };

        self.goals
            .push(GoalRecord::new(name, description, base_points, variant));
        tracing::debug!(kind = %kind, name, index = self.goals.len(), "goal created");
        Ok(self.goals.len())
    }

    /// Like [`GoalStore::create`], but takes the kind as text
    /// (`"simple"`, `"ChecklistGoal"`, `"2"`, ...).
    pub fn create_from_tag(
        &mut self,
        kind: &str,
        name: &str,
        description: &str,
        base_points: i64,
        checklist: Option<ChecklistTerms>,
    ) -> Result<usize, GoalError> {
        let kind: GoalKind = kind.parse()?;
        self.create(kind, name, description, base_points, checklist)
    }

    /// Detail lines for every goal, in index order.
    pub fn list(&self) -> Result<Vec<String>, GoalError> {
        if self.goals.is_empty() {
            return Err(GoalError::NoGoals);
        }
        Ok(self.goals.iter().map(GoalRecord::details).collect())
    }

    /// Goal names, in index order.
    pub fn names(&self) -> Result<Vec<String>, GoalError> {
        if self.goals.is_empty() {
            return Err(GoalError::NoGoals);
        }
        Ok(self.goals.iter().map(|g| g.name.clone()).collect())
    }

    /// Record one accomplishment of the goal at 1-based `index` and add the
    /// points it earns to the score.
    ///
    /// The goal and the score change together or not at all: a bad index or
    /// an overflowing counter, points, or score leaves the store as it was.
    pub fn record_event(&mut self, index: usize) -> Result<EventOutcome, GoalError> {
        let count = self.goals.len();
        let goal = index
            .checked_sub(1)
            .and_then(|i| self.goals.get_mut(i))
            .ok_or(GoalError::InvalidIndex { index, count })?;

        let step = goal.variant.next_event(goal.base_points)?;
        let score = self
            .score
            .checked_add(step.points)
            .ok_or_else(|| GoalError::Overflow {
                what: "score".to_string(),
            })?;

        goal.variant = step.variant;
        self.score = score;
        let outcome = EventOutcome {
            points_awarded: step.points,
            completed: goal.is_complete(),
        };

        tracing::debug!(
            index,
            points = outcome.points_awarded,
            completed = outcome.completed,
            score = self.score,
            "event recorded"
        );
        Ok(outcome)
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn goals(&self) -> &[GoalRecord] {
        &self.goals
    }

    /// Goal at 1-based `index`, if any.
    pub fn get(&self, index: usize) -> Option<&GoalRecord> {
        index.checked_sub(1).and_then(|i| self.goals.get(i))
    }

    /// Write the whole store to `path` in the goal-file format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GoalError> {
        let path = path.as_ref();
        fs::write(path, codec::encode(self)).map_err(|source| GoalError::StorageUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(path = %path.display(), goals = self.goals.len(), "goals saved");
        Ok(())
    }

    /// Replace this store's goals and score with the contents of `path`.
    ///
    /// If the file can't be read the store is untouched. If a line fails to
    /// decode, the goals before it stay loaded and the error is returned.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), GoalError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GoalError::StorageUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        codec::decode_into(self, &text)?;
        tracing::info!(path = %path.display(), goals = self.goals.len(), "goals loaded");
        Ok(())
    }

    pub(crate) fn reset_goals(&mut self) {
        self.goals.clear();
    }

    pub(crate) fn set_score(&mut self, score: i64) {
        self.score = score;
    }

    pub(crate) fn push_decoded(&mut self, goal: GoalRecord) {
        self.goals.push(goal);
    }
}

fn check_free_text(field: &str, value: &str) -> Result<(), GoalError> {
    if value.contains(RESERVED_CHARS) {
        return Err(GoalError::InvalidField {
            field: field.to_string(),
            reason: "must not contain ',', ':' or line breaks".to_string(),
        });
    }
    Ok(())
}
