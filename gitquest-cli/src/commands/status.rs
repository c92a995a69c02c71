use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use std::path::PathBuf;

use crate::commands::Session;
use crate::display;

pub fn run(db: Option<PathBuf>) -> Result<()> {
    let session = Session::load(db)?;

    display::level_header(&session);
    display::repo_panel(&session);

    let commits = session.state.repository.commits();
    if let Some(last) = commits.last() {
        println!(
            "{} {} {}",
            session.t("repo.currentBranch").dimmed(),
            session.state.repository.current_branch().bold(),
            format!(
                "({})",
                last.timestamp
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
            )
            .dimmed()
        );
    }

    Ok(())
}
