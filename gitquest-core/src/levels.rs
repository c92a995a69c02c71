use std::collections::BTreeMap;

/// XP needed to fill the progression bar.
pub const XP_TARGET: u32 = 1000;

/// Static description of one teaching level: copy keys plus the badge it
/// awards. All strings resolve through the i18n catalog.
#[derive(Debug, Clone, Copy)]
pub struct LevelSpec {
    pub id: &'static str,
    /// Short label on the level map, e.g. "git init".
    pub label_key: &'static str,
    /// Named location shown in the footer of the map.
    pub location_key: &'static str,
    pub title_key: &'static str,
    pub subtitle_key: &'static str,
    pub hint_key: &'static str,
    pub badge_id: &'static str,
    pub badge_key: &'static str,
}

pub const LEVELS: &[LevelSpec] = &[
    LevelSpec {
        id: "1",
        label_key: "levelMap.one",
        location_key: "levelMap.starterCottage",
        title_key: "quest.level1.title",
        subtitle_key: "quest.level1.subtitle",
        hint_key: "quest.level1.hint",
        badge_id: "first-steps",
        badge_key: "progression.firstSteps",
    },
    LevelSpec {
        id: "2",
        label_key: "levelMap.two",
        location_key: "levelMap.neonForest",
        title_key: "quest.level2.title",
        subtitle_key: "quest.level2.subtitle",
        hint_key: "quest.level2.hint",
        badge_id: "committed",
        badge_key: "progression.committed",
    },
    LevelSpec {
        id: "3",
        label_key: "levelMap.three",
        location_key: "levelMap.branching",
        title_key: "quest.level3.title",
        subtitle_key: "quest.level3.subtitle",
        hint_key: "quest.level3.hint",
        badge_id: "branch-walker",
        badge_key: "progression.branchWalker",
    },
    LevelSpec {
        id: "4",
        label_key: "levelMap.four",
        location_key: "levelMap.mergeJunction",
        title_key: "quest.level4.title",
        subtitle_key: "quest.level4.subtitle",
        hint_key: "quest.level4.hint",
        badge_id: "merge-master",
        badge_key: "progression.mergeMaster",
    },
];

pub fn get(level_id: &str) -> Option<&'static LevelSpec> {
    LEVELS.iter().find(|l| l.id == level_id)
}

/// Level 1 is always open; every other level requires the previous one.
pub fn is_unlocked(level_id: &str, completed: &BTreeMap<String, bool>) -> bool {
    if level_id == "1" {
        return true;
    }
    let Ok(n) = level_id.parse::<u32>() else {
        return false;
    };
    if n < 2 {
        return false;
    }
    completed
        .get(&(n - 1).to_string())
        .copied()
        .unwrap_or(false)
}

/// Map-footer location label for a level, defaulting to the first level's.
pub fn location_key(level_id: &str) -> &'static str {
    get(level_id)
        .map(|l| l.location_key)
        .unwrap_or(LEVELS[0].location_key)
}

/// Display tier grows every 100 XP.
pub fn tier(xp: u32) -> u32 {
    xp / 100 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(ids: &[&str]) -> BTreeMap<String, bool> {
        ids.iter().map(|id| (id.to_string(), true)).collect()
    }

    #[test]
    fn test_first_level_always_unlocked() {
        assert!(is_unlocked("1", &BTreeMap::new()));
    }

    #[test]
    fn test_levels_unlock_in_order() {
        let none = BTreeMap::new();
        assert!(!is_unlocked("2", &none));
        assert!(is_unlocked("2", &completed(&["1"])));
        assert!(!is_unlocked("3", &completed(&["1"])));
        assert!(is_unlocked("4", &completed(&["1", "2", "3"])));
    }

    #[test]
    fn test_non_numeric_level_is_locked() {
        assert!(!is_unlocked("boss", &completed(&["1", "2", "3"])));
        assert!(!is_unlocked("0", &completed(&["1"])));
    }

    #[test]
    fn test_location_key_falls_back_to_first_level() {
        assert_eq!(location_key("3"), "levelMap.branching");
        assert_eq!(location_key("42"), "levelMap.starterCottage");
    }

    #[test]
    fn test_tier() {
        assert_eq!(tier(0), 1);
        assert_eq!(tier(250), 3);
        assert_eq!(tier(1000), 11);
    }
}
