use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Select};

use gitquest_core::{levels, AvatarMood, Error, MergeOutcome, ResolveStrategy, XP_PER_QUEST};

use crate::commands::Session;
use crate::display;

const LEVEL_ID: &str = "4";

pub fn run(session: &mut Session) -> Result<()> {
    let spec = levels::get(LEVEL_ID).expect("level 4 is registered");

    if session.state.repository.initialized {
        session.state.repository.ensure_branch_commits();
        session.save()?;
    }

    if session.state.avatar_messages.is_empty() {
        session.state.set_avatar_mood(AvatarMood::Encouraging);
        session.say("quest.level4.welcome");
    }

    loop {
        let merged = session.state.repository.has_merge_commit();
        let objectives = vec![(session.t("quest.level4.objectiveMerge"), merged)];
        let completed = session.state.is_complete(LEVEL_ID) && merged;
        display::quest_panel(session, spec, &objectives, completed);
        display::avatar_panel(session);
        display::repo_panel(session);

        if session.state.repository.merge_state.is_some() {
            if !handle_conflict(session)? {
                return Ok(());
            }
            continue;
        }

        let items = vec![
            session.t("quest.level4.buttonMerge"),
            session.t("play.leaveLevel"),
        ];
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(session.t("play.chooseAction"))
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => handle_merge(session)?,
            _ => return Ok(()),
        }
    }
}

fn pick_branch(session: &Session, prompt_key: &str) -> Result<String> {
    let names: Vec<String> = session
        .state
        .repository
        .branches
        .iter()
        .map(|b| b.name.clone())
        .collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(session.t(prompt_key))
        .items(&names)
        .default(0)
        .interact()?;
    Ok(names[choice].clone())
}

fn handle_merge(session: &mut Session) -> Result<()> {
    let target = pick_branch(session, "quest.level4.selectTarget")?;
    let source = pick_branch(session, "quest.level4.selectSource")?;

    match session.state.repository.merge(&source, &target) {
        Ok(MergeOutcome::Clean(_)) => {
            session.state.set_avatar_mood(AvatarMood::Encouraging);
            session.say_with(
                "quest.level4.mergeInitiated",
                &[("source", source.as_str()), ("target", target.as_str())],
            );
            session.state.set_avatar_mood(AvatarMood::LevelComplete);
            session.say("quest.level4.mergeSuccess");
            complete_quest(session);
        }
        Ok(MergeOutcome::Conflict(_)) => {
            session.state.set_avatar_mood(AvatarMood::Encouraging);
            session.say_with(
                "quest.level4.mergeInitiated",
                &[("source", source.as_str()), ("target", target.as_str())],
            );
            session.say("quest.level4.conflictDetected");
        }
        Err(Error::MergeSameBranch(_)) => {
            session.say("quest.level4.errorSameBranch");
        }
        Err(Error::NothingToMerge(branch)) => {
            session.say_with("quest.level4.errorNoCommits", &[("branch", branch.as_str())]);
        }
        Err(e) => return Err(e.into()),
    }
    session.save()
}

/// Render the conflict box and let the player pick a resolution. Returns
/// `false` when the player leaves the level instead.
fn handle_conflict(session: &mut Session) -> Result<bool> {
    let Some(state) = session.state.repository.merge_state.clone() else {
        return Ok(true);
    };

    println!("{}", session.t("quest.level4.conflictTitle").yellow().bold());
    println!(
        "{}",
        session.tf(
            "quest.level4.conflictExplanation",
            &[
                ("source", state.source.as_str()),
                ("target", state.target.as_str()),
            ],
        )
    );
    for file in &state.conflicting_files {
        println!("  {}", file.red());
    }
    println!();

    let items = vec![
        session.t("quest.level4.keepCurrent"),
        session.t("quest.level4.useIncoming"),
        session.t("play.leaveLevel"),
    ];
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(session.t("play.chooseAction"))
        .items(&items)
        .default(0)
        .interact()?;

    let strategy = match choice {
        0 => ResolveStrategy::KeepCurrent,
        1 => ResolveStrategy::UseIncoming,
        _ => return Ok(false),
    };

    session.state.repository.resolve_merge(strategy)?;
    session.state.set_avatar_mood(AvatarMood::LevelComplete);
    session.say("quest.level4.mergeResolved");
    complete_quest(session);
    session.save()?;
    Ok(true)
}

fn complete_quest(session: &mut Session) {
    if session.state.mark_level_complete(LEVEL_ID).is_some() {
        display::quest_complete_overlay(session, "quest.level4.questComplete", XP_PER_QUEST);
    }
}
