use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Repository is not initialized")]
    NotInitialized,

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("Branch already exists: {0}")]
    BranchExists(String),

    #[error("Invalid branch name: {0:?}")]
    InvalidBranchName(String),

    #[error("File not in working directory: {0}")]
    FileNotFound(String),

    #[error("Nothing staged to commit")]
    NothingStaged,

    #[error("Commit message is empty")]
    EmptyMessage,

    #[error("Cannot merge a branch into itself: {0}")]
    MergeSameBranch(String),

    #[error("Branch has no commits to merge: {0}")]
    NothingToMerge(String),

    #[error("A merge with conflicts is already in progress")]
    MergeInProgress,

    #[error("No merge in progress")]
    NoMergeInProgress,

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}
