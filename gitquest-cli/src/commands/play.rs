use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

use gitquest_core::{levels, AvatarMood};

use crate::commands::Session;
use crate::display;
use crate::quests;

pub fn run(level: Option<String>, db: Option<PathBuf>) -> Result<()> {
    let mut session = Session::load(db)?;

    if let Some(level) = level {
        if !levels::is_unlocked(&level, &session.state.completed_levels) {
            println!(
                "{} {}",
                session.t("levels.locked").red().bold(),
                session.tf("levels.levelUnavailable", &[("level", level.as_str())])
            );
            println!(
                "{} {}",
                session.t("levels.viewAvailableLevels"),
                "gitquest levels".cyan()
            );
            return Ok(());
        }
        session.state.set_level(&level);
        session.save()?;
    }

    loop {
        display::level_header(&session);
        let level_id = session.state.current_level.clone();
        quests::run(&mut session, &level_id)?;

        // Offer the next quest on the map once this one is done.
        let Some(next) = quests::next_level(&level_id) else {
            break;
        };
        if !session.state.is_complete(&level_id)
            || !levels::is_unlocked(next, &session.state.completed_levels)
        {
            break;
        }

        let advance = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(session.t("play.continueNext"))
            .default(true)
            .interact()?;
        if !advance {
            break;
        }

        session.state.set_level(next);
        session.state.clear_avatar_messages();
        session.state.set_avatar_mood(AvatarMood::Idle);
        session.save()?;
    }

    Ok(())
}
