use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use gitquest_core::levels::{LevelSpec, XP_TARGET};
use gitquest_core::FileStatus;

use crate::commands::Session;

const MAX_VISIBLE_MESSAGES: usize = 5;

pub fn level_header(session: &Session) {
    println!();
    println!("{}", session.t("play.title").bold().cyan());
    let mut line = format!("{} {}", session.t("nav.level"), session.state.current_level);
    if session.state.xp > 0 {
        line.push_str(&format!(
            " · {} {}",
            session.state.xp,
            session.t("progression.xp")
        ));
    }
    println!("{}", line.dimmed());
    println!();
}

pub fn quest_panel(
    session: &Session,
    spec: &LevelSpec,
    objectives: &[(String, bool)],
    show_complete: bool,
) {
    println!("{}", "QUEST".bold().yellow());
    print!("{}", session.t(spec.title_key).bold());
    if show_complete {
        print!(
            "  {}",
            format!("✓ {}", session.t("quest.level1.questComplete")).green()
        );
    }
    println!();
    println!("{}", session.t(spec.subtitle_key).dimmed());
    println!("{}", session.t(spec.hint_key));
    for (label, completed) in objectives {
        if *completed {
            println!("  {} {}", "✓".green(), label.dimmed().strikethrough());
        } else {
            println!("  {} {}", "○".dimmed(), label);
        }
    }
    println!();
}

pub fn avatar_panel(session: &Session) {
    println!("{} {}", "🦊".yellow(), session.t("avatar.title").bold());
    println!(
        "   {}",
        session.t(session.state.avatar_mood.key()).dimmed().italic()
    );

    let messages = session.state.recent_messages(MAX_VISIBLE_MESSAGES);
    if messages.is_empty() {
        println!("   {}", session.t("avatar.waiting").italic().dimmed());
    } else {
        for msg in messages {
            println!("   {} {}", "▸".dimmed(), msg.text);
        }
    }
    println!();
}

pub fn repo_panel(session: &Session) {
    let repo = &session.state.repository;

    print!("{}", session.t("repo.title").bold());
    if !repo.path.is_empty() {
        print!(" {}", format!("/{}", repo.path).dimmed());
    }
    println!();

    if !repo.initialized {
        println!("  📁 {}", session.t("repo.notAGitRepo").yellow());
        println!();
        return;
    }

    println!("  {}", session.t("repo.branches").bold());
    for branch in &repo.branches {
        if branch.is_head {
            println!("    {} {}", "●".green(), branch.name.bold());
        } else {
            println!("      {}", branch.name);
        }
    }

    if !repo.working_directory.is_empty() {
        println!("  {}", session.t("repo.workingDir").bold());
        for file in &repo.working_directory {
            let status = match file.status {
                FileStatus::Modified => session.t(file.status.key()).yellow(),
                FileStatus::Untracked => session.t(file.status.key()).red(),
            };
            println!("    {} ({})", file.name, status);
        }
    }

    if !repo.staged_files.is_empty() {
        println!("  {}", session.t("repo.staged").bold());
        for file in &repo.staged_files {
            println!("    {}", file.green());
        }
    }

    println!("  {}", session.t("repo.commits").bold());
    let commits = repo.commits();
    if commits.is_empty() {
        println!("    {}", session.t("repo.noCommitsYet").dimmed());
    } else {
        for commit in commits {
            println!(
                "    {} {}",
                commit.short_id().yellow(),
                commit.message
            );
        }
    }
    println!();
}

pub fn xp_bar(session: &Session) {
    let template = format!(
        "  {{bar:32.cyan/blue}} {{pos}}/{{len}} {}",
        session.t("progression.xp")
    );
    if let Ok(style) = ProgressStyle::with_template(&template) {
        let bar = ProgressBar::new(u64::from(XP_TARGET));
        bar.set_style(style.progress_chars("█▓░"));
        bar.set_position(u64::from(session.state.xp.min(XP_TARGET)));
        bar.abandon();
    }
}

pub fn quest_complete_overlay(session: &Session, title_key: &str, xp_earned: u32) {
    let amount = xp_earned.to_string();
    println!();
    println!("  {}", "─".repeat(34).dimmed());
    println!("   🏆 {}", session.t(title_key).bold().green());
    println!(
        "      {}",
        session
            .tf("progression.xpEarned", &[("amount", amount.as_str())])
            .yellow()
            .bold()
    );
    println!("  {}", "─".repeat(34).dimmed());
    println!();
}
