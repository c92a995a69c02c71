use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use gitquest_core::{levels, AvatarMood, Error, DEFAULT_BRANCH, XP_PER_QUEST};

use crate::commands::Session;
use crate::display;

const LEVEL_ID: &str = "3";

pub fn run(session: &mut Session) -> Result<()> {
    let spec = levels::get(LEVEL_ID).expect("level 3 is registered");

    // Older saves kept one flat commit list; give every branch its own.
    if session.state.repository.initialized {
        session.state.repository.ensure_branch_commits();
        session.save()?;
    }

    if session.state.avatar_messages.is_empty() {
        session.state.set_avatar_mood(AvatarMood::Encouraging);
        session.say("quest.level3.welcome");
    }

    loop {
        let repo = &session.state.repository;
        let has_created = repo.branches.len() >= 2;
        let off_main = has_created && repo.current_branch() != DEFAULT_BRANCH;

        let objectives = vec![
            (session.t("quest.level3.objectiveCreate"), has_created),
            (session.t("quest.level3.objectiveSwitch"), off_main),
        ];
        let completed = session.state.is_complete(LEVEL_ID) && has_created && off_main;
        display::quest_panel(session, spec, &objectives, completed);
        display::avatar_panel(session);
        display::repo_panel(session);

        let items = vec![
            session.t("quest.level3.buttonCreateBranch"),
            session.t("quest.level3.buttonSwitchBranch"),
            session.t("play.leaveLevel"),
        ];
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(session.t("play.chooseAction"))
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => handle_create(session)?,
            1 => handle_switch(session)?,
            _ => return Ok(()),
        }
    }
}

fn handle_create(session: &mut Session) -> Result<()> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(session.t("quest.level3.createPlaceholder"))
        .allow_empty(true)
        .interact_text()?;
    let name = name.trim().to_string();
    if name.is_empty() {
        return Ok(());
    }

    match session.state.repository.create_branch(&name) {
        Ok(()) => {
            session.state.set_avatar_mood(AvatarMood::Success);
            session.say_with("quest.level3.branchCreated", &[("name", name.as_str())]);
        }
        Err(Error::BranchExists(_)) => {
            session.state.set_avatar_mood(AvatarMood::Idle);
            session.say_with(
                "quest.level3.errorDuplicateBranch",
                &[("name", name.as_str())],
            );
        }
        Err(e) => return Err(e.into()),
    }
    session.save()
}

fn handle_switch(session: &mut Session) -> Result<()> {
    let names: Vec<String> = session
        .state
        .repository
        .branches
        .iter()
        .map(|b| b.name.clone())
        .collect();
    let current = session.state.repository.current_branch().to_string();
    let default = names.iter().position(|n| *n == current).unwrap_or(0);

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(session.t("quest.level3.branchListLabel"))
        .items(&names)
        .default(default)
        .interact()?;
    let name = names[choice].clone();
    if name == current {
        return Ok(());
    }

    session.state.repository.switch_branch(&name)?;
    session.state.set_avatar_mood(AvatarMood::Success);
    session.say_with("quest.level3.switchedBranch", &[("name", name.as_str())]);

    let repo = &session.state.repository;
    let quest_done = repo.branches.len() >= 2 && repo.current_branch() != DEFAULT_BRANCH;
    if quest_done && session.state.mark_level_complete(LEVEL_ID).is_some() {
        session.state.set_avatar_mood(AvatarMood::LevelComplete);
        session.say("quest.level3.success");
        display::quest_complete_overlay(session, "quest.level3.questComplete", XP_PER_QUEST);
    }
    session.save()
}
