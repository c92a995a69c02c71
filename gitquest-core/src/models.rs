use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Modified,
    Untracked,
}

impl FileStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FileStatus::Modified => "modified",
            FileStatus::Untracked => "untracked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "modified" => Some(FileStatus::Modified),
            "untracked" => Some(FileStatus::Untracked),
            _ => None,
        }
    }

    /// Copy key suffix under `repo.*` for the status label.
    pub fn key(&self) -> &'static str {
        match self {
            FileStatus::Modified => "repo.modified",
            FileStatus::Untracked => "repo.untracked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingFile {
    pub name: String,
    pub status: FileStatus,
}

impl WorkingFile {
    pub fn new(name: impl Into<String>, status: FileStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub is_head: bool,
}

impl Branch {
    pub fn new(name: impl Into<String>, is_head: bool) -> Self {
        Self {
            name: name.into(),
            is_head,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    /// File names touched by this commit.
    pub files: Vec<String>,
    /// Parent commit ids; two parents denotes a merge commit.
    pub parents: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    pub fn new(message: String, files: Vec<String>, parents: Vec<String>) -> Self {
        Self {
            id: generate_commit_id(),
            message,
            files,
            parents,
            timestamp: Utc::now(),
        }
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }

    /// Abbreviated id for display, like a short hash.
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(7)]
    }
}

/// Ids are random + timestamp with no collision-proofing; good enough for a
/// handful of simulated commits.
fn generate_commit_id() -> String {
    format!(
        "{:08x}{:x}",
        rand::random::<u32>(),
        Utc::now().timestamp_millis()
    )
}

/// Transient record of a merge attempt that hit conflicting files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeState {
    pub source: String,
    pub target: String,
    pub conflicting_files: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolveStrategy {
    KeepCurrent,
    UseIncoming,
}

impl ResolveStrategy {
    pub fn as_str(&self) -> &str {
        match self {
            ResolveStrategy::KeepCurrent => "keep-current",
            ResolveStrategy::UseIncoming => "use-incoming",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AvatarMood {
    Idle,
    Encouraging,
    Success,
    Celebrating,
    LevelComplete,
}

impl Default for AvatarMood {
    fn default() -> Self {
        AvatarMood::Idle
    }
}

impl AvatarMood {
    /// Copy key for the mood line shown under the avatar.
    pub fn key(&self) -> &'static str {
        match self {
            AvatarMood::Idle => "avatar.mood.idle",
            AvatarMood::Encouraging => "avatar.mood.encouraging",
            AvatarMood::Success => "avatar.mood.success",
            AvatarMood::Celebrating => "avatar.mood.celebrating",
            AvatarMood::LevelComplete => "avatar.mood.levelComplete",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarMessage {
    pub id: Uuid,
    pub text: String,
    /// Copy key the text was resolved from, for re-rendering in another locale.
    pub key: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AvatarMessage {
    pub fn new(text: String, key: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            key,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name_key: String,
    pub earned_at: DateTime<Utc>,
}

impl Badge {
    pub fn new(id: impl Into<String>, name_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name_key: name_key.into(),
            earned_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_creation() {
        let commit = Commit::new(
            "Initial commit".to_string(),
            vec!["README.md".to_string()],
            vec![],
        );

        assert_eq!(commit.message, "Initial commit");
        assert_eq!(commit.files, vec!["README.md".to_string()]);
        assert!(commit.parents.is_empty());
        assert!(!commit.is_merge());
        assert_eq!(commit.short_id().len(), 7);
    }

    #[test]
    fn test_merge_commit_has_two_parents() {
        let a = Commit::new("a".to_string(), vec![], vec![]);
        let b = Commit::new("b".to_string(), vec![], vec![]);
        let merge = Commit::new(
            "Merge branch 'feature' into main".to_string(),
            vec![],
            vec![a.id.clone(), b.id.clone()],
        );

        assert!(merge.is_merge());
    }

    #[test]
    fn test_file_status_round_trip() {
        for status in [FileStatus::Modified, FileStatus::Untracked] {
            assert_eq!(FileStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(FileStatus::parse("renamed"), None);
    }

    #[test]
    fn test_avatar_message_carries_key() {
        let msg = AvatarMessage::new(
            "File staged!".to_string(),
            Some("quest.level2.staged".to_string()),
        );

        assert_eq!(msg.key.as_deref(), Some("quest.level2.staged"));
        assert!(!msg.text.is_empty());
    }

    #[test]
    fn test_mood_keys() {
        assert_eq!(AvatarMood::Idle.key(), "avatar.mood.idle");
        assert_eq!(
            AvatarMood::LevelComplete.key(),
            "avatar.mood.levelComplete"
        );
    }
}
