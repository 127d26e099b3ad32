use serde::{Deserialize, Serialize};

use crate::QuestId;

/// Deepest unmet quest found behind a locked quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockerInfo {
    pub quest_id: QuestId,
    pub quest_name: String,
    /// Prerequisite edges between the locked quest and this blocker (>= 1).
    pub hops: usize,
}

impl BlockerInfo {
    pub fn new(quest_id: impl Into<QuestId>, quest_name: impl Into<String>, hops: usize) -> Self {
        Self {
            quest_id: quest_id.into(),
            quest_name: quest_name.into(),
            hops,
        }
    }

    /// Player-facing explanation, e.g. `"Shortage (2 Quests Behind)"`.
    pub fn locked_reason(&self) -> String {
        if self.hops > 1 {
            format!("{} ({} Quests Behind)", self.quest_name, self.hops)
        } else {
            self.quest_name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_blocker_is_just_the_name() {
        assert_eq!(BlockerInfo::new("q1", "Debut", 1).locked_reason(), "Debut");
    }

    #[test]
    fn deeper_blockers_include_hop_count() {
        assert_eq!(
            BlockerInfo::new("q1", "Debut", 3).locked_reason(),
            "Debut (3 Quests Behind)"
        );
    }
}
