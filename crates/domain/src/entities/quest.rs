//! Quest catalog entries.
//!
//! Catalog quests are deserialized straight from the upstream JSON shape
//! (`_id`, `QuestName`, `conditions.AvailableForStart`). Only the fields the
//! status engine needs are modeled; everything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::QuestId;

/// Condition type marking a dependency on another quest.
pub const QUEST_CONDITION_TYPE: &str = "Quest";

/// A quest in the shared catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    #[serde(rename = "_id")]
    pub id: QuestId,
    /// Raw name field from the catalog. Frequently a placeholder; see
    /// [`crate::display_name::resolve`].
    #[serde(rename = "QuestName", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub conditions: QuestConditions,
}

impl Quest {
    pub fn new(id: impl Into<QuestId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            conditions: QuestConditions::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_start_condition(mut self, condition: QuestCondition) -> Self {
        self.conditions.available_for_start.push(condition);
        self
    }

    /// Convenience for the common case of a quest-completion prerequisite.
    pub fn requiring(self, required: impl Into<QuestId>) -> Self {
        let required: QuestId = required.into();
        self.with_start_condition(QuestCondition::quest(Value::String(required.into_inner())))
    }

    /// Ids of every quest named by a quest-type start condition, in catalog order.
    pub fn required_quest_ids(&self) -> Vec<QuestId> {
        self.conditions
            .available_for_start
            .iter()
            .filter(|c| c.is_quest())
            .flat_map(QuestCondition::target_ids)
            .collect()
    }
}

/// Condition groups of a quest. Only start conditions drive locking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestConditions {
    #[serde(rename = "AvailableForStart", default)]
    pub available_for_start: Vec<QuestCondition>,
}

/// A single start condition as found in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestCondition {
    #[serde(rename = "conditionType", default)]
    pub condition_type: String,
    /// Either a single quest id or a list of them for quest conditions;
    /// level/reputation conditions put other shapes here.
    #[serde(default)]
    pub target: Value,
}

impl QuestCondition {
    pub fn new(condition_type: impl Into<String>, target: Value) -> Self {
        Self {
            condition_type: condition_type.into(),
            target,
        }
    }

    pub fn quest(target: Value) -> Self {
        Self::new(QUEST_CONDITION_TYPE, target)
    }

    pub fn is_quest(&self) -> bool {
        self.condition_type == QUEST_CONDITION_TYPE
    }

    /// Normalize the target into a list of quest ids.
    ///
    /// A string is a single id, an array contributes its string entries,
    /// anything else yields nothing.
    pub fn target_ids(&self) -> Vec<QuestId> {
        match &self.target {
            Value::String(id) if !id.is_empty() => vec![QuestId::from(id.as_str())],
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(QuestId::from)
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_catalog_shape() {
        let quest: Quest = serde_json::from_value(json!({
            "_id": "q2",
            "QuestName": "Debut",
            "conditions": {
                "AvailableForStart": [
                    { "conditionType": "Level", "target": 5, "value": 5 },
                    { "conditionType": "Quest", "target": "q1", "status": [4] }
                ],
                "AvailableForFinish": []
            },
            "traderId": "prapor"
        }))
        .unwrap();

        assert_eq!(quest.id, QuestId::from("q2"));
        assert_eq!(quest.name.as_deref(), Some("Debut"));
        assert_eq!(quest.conditions.available_for_start.len(), 2);
        assert_eq!(quest.required_quest_ids(), vec![QuestId::from("q1")]);
    }

    #[test]
    fn missing_conditions_default_to_empty() {
        let quest: Quest = serde_json::from_value(json!({ "_id": "q1" })).unwrap();
        assert!(quest.name.is_none());
        assert!(quest.required_quest_ids().is_empty());
    }

    #[test]
    fn list_targets_keep_only_string_entries() {
        let condition = QuestCondition::quest(json!(["a", 7, "b", null, ""]));
        assert_eq!(
            condition.target_ids(),
            vec![QuestId::from("a"), QuestId::from("b")]
        );
    }

    #[test]
    fn unexpected_target_shapes_yield_nothing() {
        assert!(QuestCondition::quest(json!({ "id": "a" })).target_ids().is_empty());
        assert!(QuestCondition::quest(json!(12)).target_ids().is_empty());
        assert!(QuestCondition::quest(Value::Null).target_ids().is_empty());
    }

    #[test]
    fn non_quest_conditions_are_not_prerequisites() {
        let quest = Quest::new("q3")
            .with_start_condition(QuestCondition::new("TraderLoyalty", json!("q1")))
            .requiring("q2");
        assert_eq!(quest.required_quest_ids(), vec![QuestId::from("q2")]);
    }
}
