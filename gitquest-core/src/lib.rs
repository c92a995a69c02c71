//! # gitquest-core
//!
//! Core library for gitquest - a game that teaches Git through simulated
//! repository operations.
//!
//! This crate provides the simulated repository state machine, the quest and
//! progress state, the translation catalog, and key-value persistence. There
//! is no real version-control engine here: every operation is a small,
//! deterministic state transition over in-memory objects.

pub mod error;
pub mod game;
pub mod i18n;
pub mod levels;
pub mod models;
pub mod repository;
pub mod storage;

pub use error::{Error, Result};
pub use game::{GameState, XP_PER_QUEST};
pub use i18n::{Catalog, Locale};
pub use models::{
    AvatarMessage, AvatarMood, Badge, Branch, Commit, FileStatus, MergeState, ResolveStrategy,
    WorkingFile,
};
pub use repository::{MergeOutcome, Repository, DEFAULT_BRANCH};
pub use storage::Storage;
