// goal.rs — Goal subcommands: create, list, record.

use clap::Subcommand;
use quest_goal::{ChecklistTerms, GoalError, GoalKind, QuestConfig, QuestEvent};

use super::Session;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal.
    Create {
        /// Goal kind: simple, eternal, or checklist.
        kind: String,
        /// Short goal name (e.g., "Run a marathon").
        name: String,
        /// What the goal is about.
        #[arg(long, default_value = "")]
        description: String,
        /// Points awarded each time the goal is recorded.
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
        /// Checklist only: how many times the goal must be accomplished.
        #[arg(long)]
        target: Option<u32>,
        /// Checklist only: bonus awarded when the target is reached.
        #[arg(long)]
        bonus: Option<u32>,
    },
    /// List all goals with their progress.
    List,
    /// Record that a goal was accomplished.
    Record {
        /// Goal number as shown by `quest goal list`.
        index: usize,
    },
}

pub fn execute(cmd: &GoalCommands, config: &QuestConfig) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;

    match cmd {
        GoalCommands::Create {
            kind,
            name,
            description,
            points,
            target,
            bonus,
        } => {
            let terms = checklist_terms(*target, *bonus);
            create_goal(&mut session, kind, name, description, *points, terms)?;
            session.save(&config.goals_file)
        }
        GoalCommands::List => list_goals(&session),
        GoalCommands::Record { index } => {
            record_goal(&mut session, *index)?;
            session.save(&config.goals_file)
        }
    }
}

/// Terms are only complete when both halves were given.
pub(crate) fn checklist_terms(target: Option<u32>, bonus: Option<u32>) -> Option<ChecklistTerms> {
    match (target, bonus) {
        (Some(target), Some(bonus)) => Some(ChecklistTerms { target, bonus }),
        _ => None,
    }
}

fn create_goal(
    session: &mut Session,
    kind: &str,
    name: &str,
    description: &str,
    points: i64,
    terms: Option<ChecklistTerms>,
) -> anyhow::Result<()> {
    let kind: GoalKind = kind.parse()?;
    let index = session
        .store
        .create(kind, name, description, points, terms)?;
    session
        .events
        .record(&QuestEvent::goal_created(index, name, kind));

    println!("Created {} goal #{}: {}", kind, index, name);
    Ok(())
}

fn list_goals(session: &Session) -> anyhow::Result<()> {
    match session.store.list() {
        Ok(lines) => {
            println!("Your goals:");
            for (i, line) in lines.iter().enumerate() {
                println!("{}. {}", i + 1, line);
            }
            println!("\nYou have {} points.", session.store.score());
            Ok(())
        }
        Err(GoalError::NoGoals) => {
            println!("No goals yet. Create one with `quest goal create`.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn record_goal(session: &mut Session, index: usize) -> anyhow::Result<()> {
    let outcome = session.store.record_event(index)?;
    let score = session.store.score();
    if let Some(goal) = session.store.get(index) {
        session.events.record(&QuestEvent::event_recorded(
            index,
            goal.name(),
            outcome,
            score,
        ));
    }

    println!("Congratulations! You have earned {} points!", outcome.points_awarded);
    if outcome.completed {
        println!("Goal completed! Amazing work!");
    }
    println!("You now have {} points.", score);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_goal::GoalStore;
    use tempfile::TempDir;

    #[test]
    fn create_then_record_persists_through_reopen() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());

        execute(
            &GoalCommands::Create {
                kind: "checklist".to_string(),
                name: "Temple".to_string(),
                description: "ten visits".to_string(),
                points: 50,
                target: Some(2),
                bonus: Some(100),
            },
            &config,
        )
        .unwrap();
        execute(&GoalCommands::Record { index: 1 }, &config).unwrap();
        execute(&GoalCommands::Record { index: 1 }, &config).unwrap();

        let mut store = GoalStore::new();
        store.load(&config.goals_file).unwrap();
        assert_eq!(store.score(), 200);
        assert!(store.get(1).unwrap().is_complete());

        // Created, two recorded events, and a save after each command.
        let log = std::fs::read_to_string(&config.events_log).unwrap();
        assert_eq!(log.matches("goal_created").count(), 1);
        assert_eq!(log.matches("event_recorded").count(), 2);
        assert_eq!(log.matches("goals_saved").count(), 3);
    }

    #[test]
    fn create_accepts_menu_number_as_kind() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());

        execute(
            &GoalCommands::Create {
                kind: "2".to_string(),
                name: "Scripture".to_string(),
                description: "read daily".to_string(),
                points: 100,
                target: None,
                bonus: None,
            },
            &config,
        )
        .unwrap();

        let mut store = GoalStore::new();
        store.load(&config.goals_file).unwrap();
        assert_eq!(store.get(1).unwrap().kind(), GoalKind::Eternal);

        let log = std::fs::read_to_string(&config.events_log).unwrap();
        let created = log.lines().next().unwrap();
        assert!(created.contains("\"kind\":\"eternal\""));
        assert!(created.contains("\"name\":\"Scripture\""));
    }

    #[test]
    fn unknown_kind_creates_nothing() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());

        let err = execute(
            &GoalCommands::Create {
                kind: "negative".to_string(),
                name: "Sloth".to_string(),
                description: String::new(),
                points: 10,
                target: None,
                bonus: None,
            },
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GoalError>(),
            Some(GoalError::InvalidGoalKind(_))
        ));
        assert!(!config.goals_file.exists());
        assert!(!config.events_log.exists());
    }

    #[test]
    fn checklist_without_bonus_is_rejected() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());

        let result = execute(
            &GoalCommands::Create {
                kind: "checklist".to_string(),
                name: "Temple".to_string(),
                description: String::new(),
                points: 50,
                target: Some(10),
                bonus: None,
            },
            &config,
        );
        assert!(result.is_err());
        assert!(!config.goals_file.exists());
    }

    #[test]
    fn record_out_of_range_does_not_touch_file() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());

        let result = execute(&GoalCommands::Record { index: 3 }, &config);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GoalError>(),
            Some(GoalError::InvalidIndex { index: 3, count: 0 })
        ));
        assert!(!config.goals_file.exists());
    }

    #[test]
    fn checklist_terms_need_both_values() {
        assert_eq!(checklist_terms(Some(3), None), None);
        assert_eq!(checklist_terms(None, Some(3)), None);
        assert_eq!(
            checklist_terms(Some(3), Some(7)),
            Some(ChecklistTerms {
                target: 3,
                bonus: 7
            })
        );
    }
}
