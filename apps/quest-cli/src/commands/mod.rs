// mod.rs — Shared session state for the quest subcommands.

pub mod goal;
pub mod menu;
pub mod score;

use std::fs;
use std::path::Path;

use quest_goal::{EventLog, GoalStore, QuestConfig, QuestEvent};

/// A goal store plus where it came from and where events go.
pub struct Session {
    pub store: GoalStore,
    pub events: EventLog,
}

impl Session {
    /// Load the configured goal file, or start empty if it doesn't exist yet.
    pub fn open(config: &QuestConfig) -> anyhow::Result<Self> {
        let mut session = Self {
            store: GoalStore::new(),
            events: EventLog::for_config(config),
        };
        if config.goals_file.exists() {
            session.load(&config.goals_file)?;
        }
        Ok(session)
    }

    /// Write the store to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.store.save(path)?;
        self.events
            .record(&QuestEvent::goals_saved(path, &self.store));
        Ok(())
    }

    /// Replace the store with the contents of `path`.
    pub fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        self.store.load(path)?;
        self.events
            .record(&QuestEvent::goals_loaded(path, &self.store));
        Ok(())
    }
}
