//! # quest-cli
//!
//! Command-line interface for Eternal Quest.
//!
//! - `quest goal create/list/record` — manage goals in the project's goal file
//! - `quest score` — show the running score
//! - `quest menu` — the interactive create/list/save/load/record loop

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quest_goal::QuestConfig;
use tracing_subscriber::EnvFilter;

/// Eternal Quest — set goals, record progress, earn points.
#[derive(Parser)]
#[command(name = "quest", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".", global = true)]
    project_root: PathBuf,

    /// Goal file to use instead of `.quest/goals.txt`.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Log progress (save, load, config) to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, list, and record goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Show the current score.
    Score,
    /// Start the interactive menu.
    Menu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't mix with command output.
    let level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("quest_goal={}", level).parse()?)
                .add_directive(format!("quest={}", level).parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let mut config = QuestConfig::load(&project_root)?;
    if let Some(file) = cli.file {
        config.goals_file = file;
    }
    tracing::info!("Goal file: {}", config.goals_file.display());

    match &cli.command {
        Commands::Goal { command } => commands::goal::execute(command, &config),
        Commands::Score => commands::score::execute(&config),
        Commands::Menu => commands::menu::execute(&config),
    }
}
