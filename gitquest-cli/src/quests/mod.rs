mod branch;
mod init;
mod merge;
mod stage_commit;

use anyhow::Result;
use colored::Colorize;

use gitquest_core::levels;

use crate::commands::Session;

/// Run one level's interactive screen. Returns once the player leaves it.
pub fn run(session: &mut Session, level_id: &str) -> Result<()> {
    match level_id {
        "1" => init::run(session),
        "2" => stage_commit::run(session),
        "3" => branch::run(session),
        "4" => merge::run(session),
        _ => {
            unavailable(session, level_id);
            Ok(())
        }
    }
}

fn unavailable(session: &Session, level_id: &str) {
    println!(
        "{}",
        session
            .tf("levels.levelUnavailable", &[("level", level_id)])
            .yellow()
    );
    println!(
        "{} {}",
        session.t("levels.viewAvailableLevels"),
        "gitquest levels".cyan()
    );
}

/// Next level on the map after `level_id`, if the registry has one.
pub fn next_level(level_id: &str) -> Option<&'static str> {
    let idx = levels::LEVELS.iter().position(|l| l.id == level_id)?;
    levels::LEVELS.get(idx + 1).map(|l| l.id)
}
