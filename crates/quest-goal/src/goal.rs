// goal.rs — Goal kinds, per-kind state, and the GoalRecord entity.
//
// Every goal is a name/description/base-points triple plus one GoalVariant.
// The variant decides what "recording an event" means:
//   Simple:    done once, flips to complete
//   Eternal:   never complete, counts repetitions
//   Checklist: complete after `target` events, bonus on the event that hits it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// The three kinds of goal a store can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Simple,
    Eternal,
    Checklist,
}

impl GoalKind {
    /// Tag written at the start of each line in the goal file.
    pub fn tag(&self) -> &'static str {
        match self {
            GoalKind::Simple => "SimpleGoal",
            GoalKind::Eternal => "EternalGoal",
            GoalKind::Checklist => "ChecklistGoal",
        }
    }

    /// Parse a goal-file tag. Tags are matched exactly, as they are written.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SimpleGoal" => Some(GoalKind::Simple),
            "EternalGoal" => Some(GoalKind::Eternal),
            "ChecklistGoal" => Some(GoalKind::Checklist),
            _ => None,
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalKind::Simple => write!(f, "simple"),
            GoalKind::Eternal => write!(f, "eternal"),
            GoalKind::Checklist => write!(f, "checklist"),
        }
    }
}

/// Accepts `simple`, `SimpleGoal`, or the menu number `1` (and likewise for
/// the other kinds), ignoring case.
impl FromStr for GoalKind {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "simple" | "simplegoal" => Ok(GoalKind::Simple),
            "2" | "eternal" | "eternalgoal" => Ok(GoalKind::Eternal),
            "3" | "checklist" | "checklistgoal" => Ok(GoalKind::Checklist),
            _ => Err(GoalError::InvalidGoalKind(s.to_string())),
        }
    }
}

/// Extra creation arguments a checklist goal needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistTerms {
    /// Number of events needed to complete the goal. Must be > 0.
    pub target: u32,
    /// Points added on the event that reaches `target`.
    pub bonus: u32,
}

/// Per-kind goal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalVariant {
    Simple {
        completed: bool,
    },
    Eternal {
        times_completed: u32,
    },
    Checklist {
        target: u32,
        bonus: u32,
        amount_completed: u32,
    },
}

impl GoalVariant {
    pub fn simple() -> Self {
        GoalVariant::Simple { completed: false }
    }

    pub fn eternal() -> Self {
        GoalVariant::Eternal { times_completed: 0 }
    }

    pub fn checklist(terms: ChecklistTerms) -> Self {
        GoalVariant::Checklist {
            target: terms.target,
            bonus: terms.bonus,
            amount_completed: 0,
        }
    }

    pub fn kind(&self) -> GoalKind {
        match self {
            GoalVariant::Simple { .. } => GoalKind::Simple,
            GoalVariant::Eternal { .. } => GoalKind::Eternal,
            GoalVariant::Checklist { .. } => GoalKind::Checklist,
        }
    }

    /// What one more accomplishment would do: the next state and the points
    /// it earns. `self` is untouched, so a caller can check the points
    /// against its own totals before committing.
    ///
    /// The checklist bonus is paid on the event that moves the count from
    /// `target - 1` to `target`, and on no other.
    pub fn next_event(&self, base_points: i64) -> Result<EventStep, GoalError> {
        let (variant, points) = match *self {
            // A completed simple goal stays completed and keeps scoring.
            GoalVariant::Simple { .. } => (GoalVariant::Simple { completed: true }, base_points),
            GoalVariant::Eternal { times_completed } => {
                let times_completed = bump(times_completed, "times completed")?;
                (GoalVariant::Eternal { times_completed }, base_points)
            }
            GoalVariant::Checklist {
                target,
                bonus,
                amount_completed,
            } => {
                let amount_completed = bump(amount_completed, "amount completed")?;
                let points = if amount_completed == target {
                    base_points
                        .checked_add(i64::from(bonus))
                        .ok_or_else(|| overflow("points awarded"))?
                } else {
                    base_points
                };
                let variant = GoalVariant::Checklist {
                    target,
                    bonus,
                    amount_completed,
                };
                (variant, points)
            }
        };
        Ok(EventStep { variant, points })
    }

    pub fn is_complete(&self) -> bool {
        match self {
            GoalVariant::Simple { completed } => *completed,
            GoalVariant::Eternal { .. } => false,
            GoalVariant::Checklist {
                target,
                amount_completed,
                ..
            } => amount_completed >= target,
        }
    }

    fn marker(&self) -> &'static str {
        if self.is_complete() {
            "[X]"
        } else {
            "[ ]"
        }
    }
}

/// Outcome of [`GoalVariant::next_event`], not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStep {
    pub variant: GoalVariant,
    pub points: i64,
}

fn bump(count: u32, what: &str) -> Result<u32, GoalError> {
    count.checked_add(1).ok_or_else(|| overflow(what))
}

fn overflow(what: &str) -> GoalError {
    GoalError::Overflow {
        what: what.to_string(),
    }
}

/// One goal: identity fields plus its kind-specific state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRecord {
    /// Short display name. Not required to be unique.
    pub name: String,
    pub description: String,
    /// Points awarded per event, before any checklist bonus.
    pub base_points: i64,
    pub variant: GoalVariant,
}

impl GoalRecord {
    pub(crate) fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        base_points: i64,
        variant: GoalVariant,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            base_points,
            variant,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> GoalKind {
        self.variant.kind()
    }

    /// Apply one accomplishment and return the points it earns. On error the
    /// goal is unchanged.
    pub fn record_event(&mut self) -> Result<i64, GoalError> {
        let step = self.variant.next_event(self.base_points)?;
        self.variant = step.variant;
        Ok(step.points)
    }

    pub fn is_complete(&self) -> bool {
        self.variant.is_complete()
    }

    /// One-line, human-readable status for goal listings.
    pub fn details(&self) -> String {
        let head = format!(
            "{} {} ({})",
            self.variant.marker(),
            self.name,
            self.description
        );
        match &self.variant {
            GoalVariant::Simple { .. } => head,
            GoalVariant::Eternal { times_completed } => {
                format!("{} - Completed {} times", head, times_completed)
            }
            GoalVariant::Checklist {
                target,
                amount_completed,
                ..
            } => format!(
                "{} -- Currently completed: {}/{}",
                head, amount_completed, target
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple() -> GoalRecord {
        GoalRecord::new("Run", "marathon", 1000, GoalVariant::simple())
    }

    fn eternal() -> GoalRecord {
        GoalRecord::new("Read", "daily", 100, GoalVariant::eternal())
    }

    fn checklist(target: u32, bonus: u32) -> GoalRecord {
        GoalRecord::new(
            "Temple",
            "attend",
            50,
            GoalVariant::checklist(ChecklistTerms { target, bonus }),
        )
    }

    #[test]
    fn simple_completes_on_first_event_and_keeps_scoring() {
        let mut goal = simple();
        assert!(!goal.is_complete());

        assert_eq!(goal.record_event().unwrap(), 1000);
        assert!(goal.is_complete());

        assert_eq!(goal.record_event().unwrap(), 1000);
        assert!(goal.is_complete());
    }

    #[test]
    fn eternal_is_never_complete() {
        let mut goal = eternal();
        for _ in 0..50 {
            assert_eq!(goal.record_event().unwrap(), 100);
            assert!(!goal.is_complete());
        }
        assert_eq!(goal.variant, GoalVariant::Eternal { times_completed: 50 });
    }

    #[test]
    fn checklist_bonus_paid_exactly_once() {
        let mut goal = checklist(3, 500);
        let awarded: Vec<i64> = (0..5).map(|_| goal.record_event().unwrap()).collect();
        assert_eq!(awarded, vec![50, 50, 550, 50, 50]);
        assert!(goal.is_complete());
    }

    #[test]
    fn checklist_completion_threshold() {
        let mut goal = checklist(2, 10);
        goal.record_event().unwrap();
        assert!(!goal.is_complete());
        goal.record_event().unwrap();
        assert!(goal.is_complete());
    }

    #[test]
    fn next_event_leaves_goal_untouched() {
        let goal = checklist(1, 10);
        let step = goal.variant.next_event(goal.base_points).unwrap();
        assert_eq!(step.points, 60);
        assert!(step.variant.is_complete());
        assert_eq!(
            goal.variant,
            GoalVariant::checklist(ChecklistTerms {
                target: 1,
                bonus: 10
            })
        );
    }

    #[test]
    fn checklist_at_counter_ceiling_pays_bonus_once_then_refuses() {
        let mut goal = GoalRecord::new(
            "a",
            "b",
            1,
            GoalVariant::Checklist {
                target: u32::MAX,
                bonus: 5,
                amount_completed: u32::MAX - 1,
            },
        );
        assert_eq!(goal.record_event().unwrap(), 6);
        let before = goal.clone();

        for _ in 0..2 {
            assert!(matches!(
                goal.record_event(),
                Err(GoalError::Overflow { .. })
            ));
            assert_eq!(goal, before);
        }
    }

    #[test]
    fn eternal_at_counter_ceiling_refuses() {
        let mut goal = GoalRecord::new(
            "a",
            "b",
            1,
            GoalVariant::Eternal {
                times_completed: u32::MAX,
            },
        );
        assert!(matches!(
            goal.record_event(),
            Err(GoalError::Overflow { .. })
        ));
        assert_eq!(
            goal.variant,
            GoalVariant::Eternal {
                times_completed: u32::MAX
            }
        );
    }

    #[test]
    fn bonus_overflowing_points_is_refused() {
        let mut goal = GoalRecord::new(
            "a",
            "b",
            i64::MAX,
            GoalVariant::checklist(ChecklistTerms {
                target: 1,
                bonus: 1,
            }),
        );
        assert!(matches!(
            goal.record_event(),
            Err(GoalError::Overflow { .. })
        ));
        assert!(!goal.is_complete());
    }

    #[test]
    fn details_text_per_kind() {
        let mut once = simple();
        assert_eq!(once.details(), "[ ] Run (marathon)");
        once.record_event().unwrap();
        assert_eq!(once.details(), "[X] Run (marathon)");

        let mut forever = eternal();
        forever.record_event().unwrap();
        assert_eq!(forever.details(), "[ ] Read (daily) - Completed 1 times");

        let mut list = checklist(2, 10);
        assert_eq!(
            list.details(),
            "[ ] Temple (attend) -- Currently completed: 0/2"
        );
        list.record_event().unwrap();
        list.record_event().unwrap();
        assert_eq!(
            list.details(),
            "[X] Temple (attend) -- Currently completed: 2/2"
        );
    }

    #[test]
    fn kind_parsing_accepts_names_tags_and_menu_numbers() {
        assert_eq!("simple".parse::<GoalKind>().unwrap(), GoalKind::Simple);
        assert_eq!("EternalGoal".parse::<GoalKind>().unwrap(), GoalKind::Eternal);
        assert_eq!("3".parse::<GoalKind>().unwrap(), GoalKind::Checklist);
        assert!(matches!(
            "mystery".parse::<GoalKind>(),
            Err(GoalError::InvalidGoalKind(_))
        ));
    }

    #[test]
    fn tags_are_exact() {
        for kind in [GoalKind::Simple, GoalKind::Eternal, GoalKind::Checklist] {
            assert_eq!(GoalKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(GoalKind::from_tag("simplegoal"), None);
    }
}
