use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::levels;
use crate::models::{AvatarMessage, AvatarMood, Badge};
use crate::repository::Repository;

/// XP awarded for each completed quest.
pub const XP_PER_QUEST: u32 = 250;

pub const FIRST_LEVEL: &str = "1";

/// Quest/progress state plus the simulated repository and avatar feedback.
///
/// Serialization is partialized: avatar mood and messages are transient and
/// rebuilt by each level screen, everything else persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub current_level: String,
    /// Level completion: level id -> completed.
    pub completed_levels: BTreeMap<String, bool>,
    pub xp: u32,
    pub badges: Vec<Badge>,
    pub repository: Repository,
    #[serde(skip)]
    pub avatar_mood: AvatarMood,
    #[serde(skip)]
    pub avatar_messages: Vec<AvatarMessage>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_level: FIRST_LEVEL.to_string(),
            completed_levels: BTreeMap::new(),
            xp: 0,
            badges: Vec::new(),
            repository: Repository::new(),
            avatar_mood: AvatarMood::Idle,
            avatar_messages: Vec::new(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&mut self, level_id: &str) {
        self.current_level = level_id.to_string();
    }

    pub fn is_complete(&self, level_id: &str) -> bool {
        self.completed_levels.get(level_id).copied().unwrap_or(false)
    }

    /// Mark a level complete. Only the first completion counts: it sets the
    /// flag, adds [`XP_PER_QUEST`] XP, and awards the level's badge, which is
    /// returned so the caller can celebrate it.
    pub fn mark_level_complete(&mut self, level_id: &str) -> Option<Badge> {
        if self.is_complete(level_id) {
            return None;
        }
        self.completed_levels.insert(level_id.to_string(), true);
        self.xp += XP_PER_QUEST;

        let badge = levels::get(level_id).and_then(|spec| {
            if self.badges.iter().any(|b| b.id == spec.badge_id) {
                None
            } else {
                let badge = Badge::new(spec.badge_id, spec.badge_key);
                self.badges.push(badge.clone());
                Some(badge)
            }
        });

        info!(level = level_id, xp = self.xp, "level complete");
        badge
    }

    pub fn set_avatar_mood(&mut self, mood: AvatarMood) {
        self.avatar_mood = mood;
    }

    pub fn add_avatar_message(&mut self, text: impl Into<String>, key: Option<&str>) {
        self.avatar_messages
            .push(AvatarMessage::new(text.into(), key.map(str::to_string)));
    }

    pub fn clear_avatar_messages(&mut self) {
        self.avatar_messages.clear();
    }

    /// Last `limit` avatar messages, oldest first.
    pub fn recent_messages(&self, limit: usize) -> &[AvatarMessage] {
        let start = self.avatar_messages.len().saturating_sub(limit);
        &self.avatar_messages[start..]
    }

    pub fn reset_progress(&mut self) {
        *self = Self::default();
        info!("progress reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GameState::new();

        assert_eq!(state.current_level, "1");
        assert_eq!(state.xp, 0);
        assert!(state.badges.is_empty());
        assert!(!state.repository.initialized);
    }

    #[test]
    fn test_mark_level_complete_awards_xp_and_badge_once() {
        let mut state = GameState::new();

        let badge = state.mark_level_complete("1");
        assert!(badge.is_some());
        assert_eq!(state.xp, XP_PER_QUEST);
        assert!(state.is_complete("1"));
        assert_eq!(state.badges.len(), 1);

        // Completing again is a no-op.
        assert!(state.mark_level_complete("1").is_none());
        assert_eq!(state.xp, XP_PER_QUEST);
        assert_eq!(state.badges.len(), 1);
    }

    #[test]
    fn test_unknown_level_still_earns_xp() {
        let mut state = GameState::new();

        let badge = state.mark_level_complete("99");

        assert!(badge.is_none());
        assert_eq!(state.xp, XP_PER_QUEST);
    }

    #[test]
    fn test_recent_messages_keeps_tail() {
        let mut state = GameState::new();
        for i in 0..8 {
            state.add_avatar_message(format!("msg {i}"), None);
        }

        let recent = state.recent_messages(5);

        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].text, "msg 3");
        assert_eq!(recent[4].text, "msg 7");
    }

    #[test]
    fn test_reset_progress() {
        let mut state = GameState::new();
        state.repository.init("my-project");
        state.mark_level_complete("1");
        state.set_level("2");

        state.reset_progress();

        assert_eq!(state.current_level, "1");
        assert_eq!(state.xp, 0);
        assert!(state.completed_levels.is_empty());
        assert!(!state.repository.initialized);
    }

    #[test]
    fn test_transient_fields_not_serialized() {
        let mut state = GameState::new();
        state.add_avatar_message("hello", Some("quest.level1.welcome"));
        state.set_avatar_mood(crate::models::AvatarMood::Success);

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert!(restored.avatar_messages.is_empty());
        assert_eq!(restored.avatar_mood, crate::models::AvatarMood::Idle);
    }
}
