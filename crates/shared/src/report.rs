//! Quest status report.
//!
//! ```json
//! {
//!   "PlayerOne": {
//!     "5936d90786f7742b1420ba5b": { "status": 0, "lockedReason": "Debut (2 Quests Behind)", "questName": "Shortage" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use questgate_domain::QuestStatus;
use serde::{Deserialize, Serialize};

/// Effective status of one quest for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestStatusEntry {
    pub status: QuestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_reason: Option<String>,
    pub quest_name: String,
}

impl QuestStatusEntry {
    pub fn new(status: QuestStatus, quest_name: impl Into<String>) -> Self {
        Self {
            status,
            locked_reason: None,
            quest_name: quest_name.into(),
        }
    }

    pub fn with_locked_reason(mut self, reason: impl Into<String>) -> Self {
        self.locked_reason = Some(reason.into());
        self
    }

    /// Entry used when a quest could not be evaluated.
    pub fn degraded(quest_id: &str) -> Self {
        Self::new(QuestStatus::Locked, quest_id)
    }
}

/// Quest id -> entry for a single profile.
pub type ProfileQuestStatuses = BTreeMap<String, QuestStatusEntry>;

/// Player display name -> quest statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestStatusReport {
    pub profiles: BTreeMap<String, ProfileQuestStatuses>,
}

impl QuestStatusReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_profile(&mut self, display_name: impl Into<String>, quests: ProfileQuestStatuses) {
        self.profiles.insert(display_name.into(), quests);
    }

    pub fn profile(&self, display_name: &str) -> Option<&ProfileQuestStatuses> {
        self.profiles.get(display_name)
    }

    pub fn entry(&self, display_name: &str, quest_id: &str) -> Option<&QuestStatusEntry> {
        self.profile(display_name)?.get(quest_id)
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_wire_shape() {
        let mut quests = ProfileQuestStatuses::new();
        quests.insert(
            "q3".to_string(),
            QuestStatusEntry::new(QuestStatus::Locked, "Shortage")
                .with_locked_reason("Debut (2 Quests Behind)"),
        );
        quests.insert(
            "q2".to_string(),
            QuestStatusEntry::new(QuestStatus::Available, "Checking"),
        );
        let mut report = QuestStatusReport::new();
        report.insert_profile("PlayerOne", quests);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "PlayerOne": {
                    "q2": { "status": 1, "questName": "Checking" },
                    "q3": { "status": 0, "lockedReason": "Debut (2 Quests Behind)", "questName": "Shortage" }
                }
            })
        );
    }

    #[test]
    fn degraded_entry_is_locked_with_id_as_name() {
        let entry = QuestStatusEntry::degraded("q9");
        assert_eq!(entry.status, QuestStatus::Locked);
        assert_eq!(entry.quest_name, "q9");
        assert!(entry.locked_reason.is_none());
    }
}
