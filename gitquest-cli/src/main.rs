use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod quests;

use commands::{lang, levels, play, reset, status};

#[derive(Parser)]
#[command(name = "gitquest")]
#[command(version, about = "Learn Git by playing. Level by level.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the current level (or jump to an unlocked one)
    Play {
        /// Level to play (defaults to where you left off)
        #[arg(short, long)]
        level: Option<String>,

        /// Database path
        #[arg(short, long)]
        db: Option<PathBuf>,
    },

    /// Show the level map with XP and badges
    Levels {
        /// Database path
        #[arg(short, long)]
        db: Option<PathBuf>,
    },

    /// Show the simulated repository state
    Status {
        /// Database path
        #[arg(short, long)]
        db: Option<PathBuf>,
    },

    /// Show or change the display language
    Lang {
        /// Locale code (e.g. "en", "hi"); omit to pick interactively
        locale: Option<String>,

        /// Database path
        #[arg(short, long)]
        db: Option<PathBuf>,
    },

    /// Reset all progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Database path
        #[arg(short, long)]
        db: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { level, db } => {
            play::run(level, db)?;
        }
        Commands::Levels { db } => {
            levels::run(db)?;
        }
        Commands::Status { db } => {
            status::run(db)?;
        }
        Commands::Lang { locale, db } => {
            lang::run(locale, db)?;
        }
        Commands::Reset { yes, db } => {
            reset::run(yes, db)?;
        }
    }

    Ok(())
}
