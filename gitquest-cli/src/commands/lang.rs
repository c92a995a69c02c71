use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use std::path::PathBuf;

use gitquest_core::i18n::{Locale, SUPPORTED_LOCALES};

use crate::commands::Session;

pub fn run(locale: Option<String>, db: Option<PathBuf>) -> Result<()> {
    let mut session = Session::load(db)?;

    println!(
        "{}",
        session.tf("lang.current", &[("label", session.locale.label())])
    );

    let locale = match locale {
        Some(code) => Locale::parse(&code)?,
        None => {
            let labels: Vec<&str> = SUPPORTED_LOCALES.iter().map(|l| l.label()).collect();
            let default = SUPPORTED_LOCALES
                .iter()
                .position(|l| *l == session.locale)
                .unwrap_or(0);
            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(session.t("lang.choose"))
                .items(&labels)
                .default(default)
                .interact()?;
            SUPPORTED_LOCALES[choice]
        }
    };

    session.storage.save_locale(locale)?;
    session.locale = locale;

    println!(
        "{}",
        session.tf("lang.updated", &[("label", locale.label())])
    );

    Ok(())
}
