//! Prerequisite graph snapshot.
//!
//! Edges point from a quest to the quests it requires. The graph is built
//! once per cache generation and never mutated afterwards; it may contain
//! cycles, so consumers must guard their traversals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::QuestId;

/// `quest_id` cannot start until `required_quest_id` is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteEdge {
    pub quest_id: QuestId,
    pub required_quest_id: QuestId,
    pub required_quest_name: String,
}

impl PrerequisiteEdge {
    pub fn new(
        quest_id: impl Into<QuestId>,
        required_quest_id: impl Into<QuestId>,
        required_quest_name: impl Into<String>,
    ) -> Self {
        Self {
            quest_id: quest_id.into(),
            required_quest_id: required_quest_id.into(),
            required_quest_name: required_quest_name.into(),
        }
    }
}

/// Direct quest prerequisites keyed by the dependent quest.
///
/// Quests without quest-type prerequisites have no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrerequisiteGraph {
    edges: HashMap<QuestId, Vec<PrerequisiteEdge>>,
}

impl PrerequisiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the edges of one quest. An empty list leaves the quest out.
    pub fn insert(&mut self, quest_id: QuestId, edges: Vec<PrerequisiteEdge>) {
        if edges.is_empty() {
            return;
        }
        self.edges.insert(quest_id, edges);
    }

    /// Direct prerequisites in catalog order; empty when the quest has none.
    pub fn prerequisites(&self, quest_id: &QuestId) -> &[PrerequisiteEdge] {
        self.edges.get(quest_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_prerequisites(&self, quest_id: &QuestId) -> bool {
        self.edges.contains_key(quest_id)
    }

    /// Number of quests with at least one prerequisite.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

impl FromIterator<PrerequisiteEdge> for PrerequisiteGraph {
    fn from_iter<I: IntoIterator<Item = PrerequisiteEdge>>(iter: I) -> Self {
        let mut edges: HashMap<QuestId, Vec<PrerequisiteEdge>> = HashMap::new();
        for edge in iter {
            edges.entry(edge.quest_id.clone()).or_default().push(edge);
        }
        Self { edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_edge_lists_are_not_stored() {
        let mut graph = PrerequisiteGraph::new();
        graph.insert(QuestId::from("q1"), Vec::new());
        assert!(!graph.has_prerequisites(&QuestId::from("q1")));
        assert!(graph.is_empty());
    }

    #[test]
    fn collects_edges_in_insertion_order() {
        let graph: PrerequisiteGraph = [
            PrerequisiteEdge::new("q3", "q1", "First"),
            PrerequisiteEdge::new("q3", "q2", "Second"),
            PrerequisiteEdge::new("q2", "q1", "First"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = graph
            .prerequisites(&QuestId::from("q3"))
            .iter()
            .map(|e| e.required_quest_name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.prerequisites(&QuestId::from("q1")).is_empty());
    }
}
