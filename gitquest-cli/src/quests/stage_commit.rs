use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use gitquest_core::{levels, AvatarMood, FileStatus, WorkingFile, XP_PER_QUEST};

use crate::commands::Session;
use crate::display;

const LEVEL_ID: &str = "2";

enum Action {
    Stage(String),
    Unstage(String),
    Commit,
    Leave,
}

fn default_working_files() -> Vec<WorkingFile> {
    vec![WorkingFile::new("README.md", FileStatus::Modified)]
}

pub fn run(session: &mut Session) -> Result<()> {
    let spec = levels::get(LEVEL_ID).expect("level 2 is registered");

    // Seed the working tree on first entry with an untouched repo.
    {
        let repo = &mut session.state.repository;
        if repo.initialized && repo.working_directory.is_empty() && repo.commits().is_empty() {
            repo.set_working_directory(default_working_files());
            session.save()?;
        }
    }

    if session.state.avatar_messages.is_empty() {
        session.state.set_avatar_mood(AvatarMood::Encouraging);
        session.say("quest.level2.welcome");
    }

    loop {
        let repo = &session.state.repository;
        let staged_something = !repo.staged_files.is_empty() || !repo.commits().is_empty();
        let committed = !repo.commits().is_empty();

        let objectives = vec![
            (session.t("quest.level2.objectiveStage"), staged_something),
            (session.t("quest.level2.objectiveCommit"), committed),
        ];
        let completed = session.state.is_complete(LEVEL_ID) && staged_something && committed;
        display::quest_panel(session, spec, &objectives, completed);
        display::avatar_panel(session);
        display::repo_panel(session);

        let mut items = Vec::new();
        let repo = &session.state.repository;
        for file in &repo.working_directory {
            if !repo.staged_files.contains(&file.name) {
                items.push((
                    format!("{} {}", session.t("quest.level2.buttonStage"), file.name),
                    Action::Stage(file.name.clone()),
                ));
            }
        }
        for file in &repo.staged_files {
            items.push((
                format!("{} {}", session.t("quest.level2.buttonUnstage"), file),
                Action::Unstage(file.clone()),
            ));
        }
        if !repo.staged_files.is_empty() {
            items.push((session.t("quest.level2.buttonCommit"), Action::Commit));
        }
        items.push((session.t("play.leaveLevel"), Action::Leave));

        let labels: Vec<&String> = items.iter().map(|(label, _)| label).collect();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(session.t("play.chooseAction"))
            .items(&labels)
            .default(0)
            .interact()?;

        match &items[choice].1 {
            Action::Stage(name) => {
                let name = name.clone();
                session.state.repository.stage(&name)?;
                session.state.set_avatar_mood(AvatarMood::Success);
                session.say("quest.level2.staged");
                session.save()?;
            }
            Action::Unstage(name) => {
                let name = name.clone();
                session.state.repository.unstage(&name);
                session.save()?;
            }
            Action::Commit => handle_commit(session)?,
            Action::Leave => return Ok(()),
        }
    }
}

fn handle_commit(session: &mut Session) -> Result<()> {
    let message: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(session.t("quest.level2.commitPlaceholder"))
        .allow_empty(true)
        .interact_text()?;
    if message.trim().is_empty() {
        return Ok(());
    }

    session.state.repository.commit(&message)?;
    session.state.set_avatar_mood(AvatarMood::Success);
    session.say("quest.level2.success");

    if session.state.mark_level_complete(LEVEL_ID).is_some() {
        session.state.set_avatar_mood(AvatarMood::LevelComplete);
        display::quest_complete_overlay(session, "quest.level2.questComplete", XP_PER_QUEST);
    }
    session.save()
}
