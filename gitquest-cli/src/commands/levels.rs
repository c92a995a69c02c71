use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use gitquest_core::levels::{self, LEVELS};

use crate::commands::Session;
use crate::display;

pub fn run(db: Option<PathBuf>) -> Result<()> {
    let session = Session::load(db)?;
    let state = &session.state;

    println!();
    println!("{}", session.t("app.name").bold().cyan());
    println!("{}", session.t("app.tagline").dimmed());
    println!();

    let tier = levels::tier(state.xp).to_string();
    println!(
        "{}   🔥 {} {}",
        session
            .tf("levels.levelTier", &[("tier", tier.as_str())])
            .bold(),
        state.badges.len().to_string().bold(),
        session.t("progression.badges")
    );
    display::xp_bar(&session);
    println!();

    println!("{}", session.t("levels.title").bold());
    println!("{}", session.t("levels.description").dimmed());
    println!();

    for spec in LEVELS {
        let completed = state.is_complete(spec.id);
        let unlocked = levels::is_unlocked(spec.id, &state.completed_levels);
        let current = state.current_level == spec.id;

        let status = if completed {
            session.t("levels.done").green()
        } else if !unlocked {
            session.t("levels.locked").dimmed()
        } else {
            session.t("levels.notStarted").yellow()
        };
        let marker = if current { "→".cyan().bold() } else { " ".normal() };
        let label = session.t(spec.label_key);
        let title = if unlocked {
            session.t(spec.title_key).normal()
        } else {
            session.t(spec.title_key).dimmed()
        };

        println!("  {} {:<20} {}  [{}]", marker, label.bold(), title, status);
    }
    println!();

    if !state.badges.is_empty() {
        println!("{}", session.t("progression.badges").bold());
        for badge in &state.badges {
            println!("  🏅 {}", session.t(&badge.name_key));
        }
        println!();
    }

    println!(
        "{}: {}",
        session.t("levels.currentLocation").dimmed(),
        session
            .t(levels::location_key(&state.current_level))
            .bold()
            .cyan()
    );

    Ok(())
}
