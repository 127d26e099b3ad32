//! Player profiles as seen by the status engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{ProfileId, QuestId, QuestStatus};

/// A tracked profile and the raw quest statuses its source reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    /// Player-facing name; profiles without one are left out of reports.
    pub display_name: Option<String>,
    #[serde(default)]
    pub quests: HashMap<QuestId, QuestStatus>,
}

impl Profile {
    pub fn new(id: impl Into<ProfileId>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            quests: HashMap::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_quest(mut self, quest_id: impl Into<QuestId>, status: QuestStatus) -> Self {
        self.quests.insert(quest_id.into(), status);
        self
    }

    /// Raw status recorded for a quest. A quest the profile has never
    /// touched is locked.
    pub fn recorded_status(&self, quest_id: &QuestId) -> QuestStatus {
        self.quests
            .get(quest_id)
            .copied()
            .unwrap_or(QuestStatus::Locked)
    }

    /// Display name, ignoring blank values.
    pub fn player_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Whether this profile belongs to a system/bot account, judged by
    /// id or display name prefix.
    pub fn matches_any_prefix(&self, prefixes: &[String]) -> bool {
        prefixes
            .iter()
            .filter(|prefix| !prefix.is_empty())
            .any(|prefix| {
                self.id.as_str().starts_with(prefix.as_str())
                    || self
                        .display_name
                        .as_deref()
                        .is_some_and(|name| name.starts_with(prefix.as_str()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_quests_are_locked() {
        let profile = Profile::new("p1").with_quest("q1", QuestStatus::Success);
        assert_eq!(profile.recorded_status(&QuestId::from("q1")), QuestStatus::Success);
        assert_eq!(profile.recorded_status(&QuestId::from("q2")), QuestStatus::Locked);
    }

    #[test]
    fn blank_display_name_counts_as_missing() {
        assert_eq!(Profile::new("p1").with_display_name("  ").player_name(), None);
        assert_eq!(
            Profile::new("p1").with_display_name("Scav").player_name(),
            Some("Scav")
        );
    }

    #[test]
    fn prefix_matching_checks_id_and_name() {
        let prefixes = vec!["headless_".to_string()];
        assert!(Profile::new("headless_01").matches_any_prefix(&prefixes));
        assert!(Profile::new("abc")
            .with_display_name("headless_host")
            .matches_any_prefix(&prefixes));
        assert!(!Profile::new("abc")
            .with_display_name("Player")
            .matches_any_prefix(&prefixes));
        assert!(!Profile::new("abc").matches_any_prefix(&[String::new()]));
    }
}
