use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::path::PathBuf;

use crate::commands::Session;

pub fn run(yes: bool, db: Option<PathBuf>) -> Result<()> {
    let mut session = Session::load(db)?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(session.t("reset.confirm"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", session.t("reset.cancelled").yellow());
            return Ok(());
        }
    }

    session.state.reset_progress();
    session.save()?;

    println!("{}", session.t("reset.done").green().bold());

    Ok(())
}
