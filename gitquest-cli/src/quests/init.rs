use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};

use gitquest_core::{levels, AvatarMood, XP_PER_QUEST};

use crate::commands::Session;
use crate::display;

const LEVEL_ID: &str = "1";
const DEFAULT_REPO_PATH: &str = "my-project";

pub fn run(session: &mut Session) -> Result<()> {
    let spec = levels::get(LEVEL_ID).expect("level 1 is registered");

    if session.state.avatar_messages.is_empty() {
        session.say("quest.level1.welcome");
    }

    loop {
        let initialized = session.state.repository.initialized;
        let completed = session.state.is_complete(LEVEL_ID);

        let objectives = vec![(session.t("quest.level1.objectiveInit"), initialized)];
        display::quest_panel(session, spec, &objectives, completed && initialized);
        display::avatar_panel(session);
        display::repo_panel(session);

        let init_label = if initialized {
            session.t("quest.level1.buttonAlreadyInit")
        } else {
            session.t("quest.level1.buttonInit")
        };
        let items = vec![init_label, session.t("play.leaveLevel")];

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(session.t("play.chooseAction"))
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            0 => handle_init(session)?,
            _ => return Ok(()),
        }
    }
}

fn handle_init(session: &mut Session) -> Result<()> {
    if session.state.repository.initialized {
        session.say("quest.level1.already");
        return Ok(());
    }

    session.state.repository.init(DEFAULT_REPO_PATH);
    session.state.set_avatar_mood(AvatarMood::Success);
    session.say("quest.level1.success");

    if session.state.mark_level_complete(LEVEL_ID).is_some() {
        session.state.set_avatar_mood(AvatarMood::LevelComplete);
        display::quest_complete_overlay(session, "quest.level1.questComplete", XP_PER_QUEST);
    }
    session.save()
}
