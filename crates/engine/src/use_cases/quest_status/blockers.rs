//! Blocker-chain search.
//!
//! For a locked quest, walks unmet prerequisites back to the quest that is
//! actually holding the chain up and explains the lock in one line.
//!
//! Each direct prerequisite is its own branch; the branch with the deepest
//! blocker wins. Within a branch the walk is depth-first and stops at the
//! first quest whose own prerequisites are all complete. Only the quests on
//! the current branch count as visited, so siblings sharing an ancestor don't
//! collide, while a branch reaching one of its own ancestors is a dead end.
//!
//! Each lookup may expand at most `max_depth × edge count` quests. Densely
//! cyclic catalogs hit that limit and fall back to listing the unmet direct
//! prerequisites.

use std::collections::{HashMap, HashSet};

use questgate_domain::{BlockerInfo, PrerequisiteEdge, PrerequisiteGraph, QuestId, QuestStatus};

/// Raw statuses of one profile, captured once per query.
#[derive(Debug, Clone, Default)]
pub struct StatusSnapshot {
    statuses: HashMap<QuestId, QuestStatus>,
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, quest_id: QuestId, status: QuestStatus) {
        self.statuses.insert(quest_id, status);
    }

    /// Quests never seen by the profile are locked.
    pub fn status(&self, quest_id: &QuestId) -> QuestStatus {
        self.statuses
            .get(quest_id)
            .copied()
            .unwrap_or(QuestStatus::Locked)
    }

    pub fn is_satisfied(&self, quest_id: &QuestId) -> bool {
        self.status(quest_id).satisfies_prerequisite()
    }
}

impl FromIterator<(QuestId, QuestStatus)> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = (QuestId, QuestStatus)>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a locked-reason lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockedReason {
    /// No quest-type prerequisites; the lock comes from level, reputation, etc.
    NoQuestPrerequisites,
    /// Every direct prerequisite is complete.
    PrerequisitesMet,
    /// At least one direct prerequisite is unmet.
    Blocked(String),
}

impl LockedReason {
    pub fn message(&self) -> Option<&str> {
        match self {
            LockedReason::Blocked(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Locked-reason search for a single profile.
///
/// Results are memoized per quest for the lifetime of the value, which is
/// one query.
pub struct BlockerSearch<'a> {
    graph: &'a PrerequisiteGraph,
    statuses: &'a StatusSnapshot,
    max_depth: usize,
    memo: HashMap<QuestId, LockedReason>,
}

impl<'a> BlockerSearch<'a> {
    pub fn new(graph: &'a PrerequisiteGraph, statuses: &'a StatusSnapshot, max_depth: usize) -> Self {
        Self {
            graph,
            statuses,
            max_depth,
            memo: HashMap::new(),
        }
    }

    pub fn locked_reason(&mut self, quest_id: &QuestId) -> LockedReason {
        if let Some(reason) = self.memo.get(quest_id) {
            return reason.clone();
        }
        let reason = self.compute_locked_reason(quest_id);
        self.memo.insert(quest_id.clone(), reason.clone());
        reason
    }

    fn compute_locked_reason(&self, quest_id: &QuestId) -> LockedReason {
        let prerequisites = self.graph.prerequisites(quest_id);
        if prerequisites.is_empty() {
            return LockedReason::NoQuestPrerequisites;
        }

        let unmet = self.unmet(prerequisites);
        if unmet.is_empty() {
            return LockedReason::PrerequisitesMet;
        }

        let mut budget = self.expansion_budget();
        let mut deepest: Option<BlockerInfo> = None;
        for edge in unmet.iter().copied() {
            if budget == 0 {
                break;
            }
            if let Some(candidate) = self.first_blocker(quest_id, edge, &mut budget) {
                if deepest.as_ref().map_or(true, |best| candidate.hops > best.hops) {
                    deepest = Some(candidate);
                }
            }
        }

        match deepest {
            Some(blocker) => LockedReason::Blocked(blocker.locked_reason()),
            None => {
                tracing::debug!(
                    quest_id = %quest_id,
                    "No root blocker resolved, listing direct prerequisites"
                );
                let names: Vec<&str> = unmet
                    .iter()
                    .map(|edge| edge.required_quest_name.as_str())
                    .collect();
                LockedReason::Blocked(names.join(", "))
            }
        }
    }

    /// Quests one locked-reason lookup may expand before giving up.
    fn expansion_budget(&self) -> usize {
        self.max_depth
            .saturating_mul(self.graph.edge_count().max(1))
    }

    /// Walk one unmet prerequisite of `root` back to its root cause.
    ///
    /// A quest whose own prerequisites are all complete ends the walk, so a
    /// completed ancestor never shows up as a blocker. The walk uses an
    /// explicit stack; `path` holds the quests on the current branch only.
    fn first_blocker(
        &self,
        root: &QuestId,
        start: &'a PrerequisiteEdge,
        budget: &mut usize,
    ) -> Option<BlockerInfo> {
        let mut path: HashSet<&QuestId> = HashSet::from([root]);
        let mut stack: Vec<Frame<'a>> = Vec::new();
        let mut next = Some((start, 1));

        loop {
            if let Some((edge, hops)) = next.take() {
                match self.visit(edge, hops, &path, budget) {
                    Visit::Blocker(info) => return Some(info),
                    Visit::Exhausted => return None,
                    Visit::DeadEnd => {}
                    Visit::Expand(pending) => {
                        path.insert(&edge.required_quest_id);
                        stack.push(Frame {
                            quest_id: &edge.required_quest_id,
                            hops,
                            pending: pending.into_iter(),
                        });
                    }
                }
            }

            let frame = stack.last_mut()?;
            match frame.pending.next() {
                Some(child) => next = Some((child, frame.hops + 1)),
                None => {
                    path.remove(frame.quest_id);
                    stack.pop();
                }
            }
        }
    }

    fn visit(
        &self,
        edge: &'a PrerequisiteEdge,
        hops: usize,
        path: &HashSet<&QuestId>,
        budget: &mut usize,
    ) -> Visit<'a> {
        let quest_id = &edge.required_quest_id;

        let Some(remaining) = budget.checked_sub(1) else {
            tracing::warn!(
                quest_id = %quest_id,
                limit = self.expansion_budget(),
                "Prerequisite search budget exhausted"
            );
            return Visit::Exhausted;
        };
        *budget = remaining;

        if hops > self.max_depth {
            tracing::warn!(
                quest_id = %quest_id,
                max_depth = self.max_depth,
                "Prerequisite chain exceeds maximum traversal depth"
            );
            return Visit::DeadEnd;
        }
        if path.contains(quest_id) {
            tracing::debug!(quest_id = %quest_id, "Prerequisite cycle detected");
            return Visit::DeadEnd;
        }

        let unmet = self.unmet(self.graph.prerequisites(quest_id));
        if unmet.is_empty() {
            return Visit::Blocker(BlockerInfo::new(
                quest_id.clone(),
                edge.required_quest_name.clone(),
                hops,
            ));
        }
        Visit::Expand(unmet)
    }

    fn unmet(&self, prerequisites: &'a [PrerequisiteEdge]) -> Vec<&'a PrerequisiteEdge> {
        prerequisites
            .iter()
            .filter(|edge| !self.statuses.is_satisfied(&edge.required_quest_id))
            .collect()
    }
}

/// A quest on the current branch and the prerequisites still to try.
struct Frame<'a> {
    quest_id: &'a QuestId,
    hops: usize,
    pending: std::vec::IntoIter<&'a PrerequisiteEdge>,
}

enum Visit<'a> {
    Blocker(BlockerInfo),
    Expand(Vec<&'a PrerequisiteEdge>),
    DeadEnd,
    Exhausted,
}
