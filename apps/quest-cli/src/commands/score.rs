// score.rs — Print the running score.

use quest_goal::QuestConfig;

use super::Session;

pub fn execute(config: &QuestConfig) -> anyhow::Result<()> {
    let session = Session::open(config)?;
    println!("You have {} points.", session.store.score());
    Ok(())
}
