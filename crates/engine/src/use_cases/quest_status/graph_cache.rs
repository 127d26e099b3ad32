//! Prerequisite graph cache.
//!
//! Holds the current [`PrerequisiteGraph`] snapshot and rebuilds it lazily
//! once it is older than the configured TTL. The staleness check and the
//! rebuild run under one lock: concurrent callers arriving mid-rebuild wait
//! for it and then share the new snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use questgate_domain::{PrerequisiteEdge, PrerequisiteGraph, Profile, Quest, QuestId};
use tokio::sync::Mutex;

use super::names::quest_display_name;
use crate::infrastructure::ports::{ClockPort, ProfileRepo};

struct GraphSnapshot {
    graph: Arc<PrerequisiteGraph>,
    built_at: DateTime<Utc>,
    generation: u64,
}

pub struct PrerequisiteGraphCache {
    profiles: Arc<dyn ProfileRepo>,
    clock: Arc<dyn ClockPort>,
    ttl: Duration,
    state: Mutex<Option<GraphSnapshot>>,
}

impl PrerequisiteGraphCache {
    pub fn new(profiles: Arc<dyn ProfileRepo>, clock: Arc<dyn ClockPort>, ttl: Duration) -> Self {
        Self {
            profiles,
            clock,
            ttl,
            state: Mutex::new(None),
        }
    }

    /// True if never built or older than the TTL.
    pub async fn is_stale(&self) -> bool {
        let state = self.state.lock().await;
        self.snapshot_is_stale(state.as_ref())
    }

    /// When the current snapshot was built.
    pub async fn built_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.as_ref().map(|s| s.built_at)
    }

    /// Number of rebuilds performed so far.
    pub async fn generation(&self) -> u64 {
        self.state.lock().await.as_ref().map_or(0, |s| s.generation)
    }

    /// Current graph, rebuilt from `catalog` first if the snapshot is stale.
    ///
    /// `sample_profile` provides the localization context for prerequisite
    /// names; without one, names fall back to quest ids.
    pub async fn current(
        &self,
        catalog: &[Quest],
        sample_profile: Option<&Profile>,
    ) -> Arc<PrerequisiteGraph> {
        let mut state = self.state.lock().await;
        if let Some(snapshot) = state.as_ref() {
            if !self.snapshot_is_stale(Some(snapshot)) {
                return snapshot.graph.clone();
            }
        }
        self.rebuild_locked(&mut state, catalog, sample_profile).await
    }

    /// Unconditionally rebuild from `catalog`.
    pub async fn rebuild(
        &self,
        catalog: &[Quest],
        sample_profile: Option<&Profile>,
    ) -> Arc<PrerequisiteGraph> {
        let mut state = self.state.lock().await;
        self.rebuild_locked(&mut state, catalog, sample_profile).await
    }

    /// Drop the snapshot so the next call rebuilds.
    pub async fn invalidate(&self) {
        *self.state.lock().await = None;
    }

    fn snapshot_is_stale(&self, snapshot: Option<&GraphSnapshot>) -> bool {
        match snapshot {
            None => true,
            Some(snapshot) => self
                .clock
                .now()
                .signed_duration_since(snapshot.built_at)
                .to_std()
                .is_ok_and(|age| age > self.ttl),
        }
    }

    async fn rebuild_locked(
        &self,
        state: &mut Option<GraphSnapshot>,
        catalog: &[Quest],
        sample_profile: Option<&Profile>,
    ) -> Arc<PrerequisiteGraph> {
        let graph = Arc::new(self.build_graph(catalog, sample_profile).await);
        let generation = state.as_ref().map_or(0, |s| s.generation) + 1;

        if catalog.is_empty() {
            tracing::info!("Quest catalog is empty, caching empty prerequisite graph");
        } else {
            tracing::info!(
                quests = catalog.len(),
                locked_quests = graph.len(),
                edges = graph.edge_count(),
                generation,
                "Rebuilt prerequisite graph"
            );
        }

        *state = Some(GraphSnapshot {
            graph: graph.clone(),
            built_at: self.clock.now(),
            generation,
        });
        graph
    }

    async fn build_graph(
        &self,
        catalog: &[Quest],
        sample_profile: Option<&Profile>,
    ) -> PrerequisiteGraph {
        let catalog_names: HashMap<&QuestId, Option<&str>> = catalog
            .iter()
            .map(|quest| (&quest.id, quest.name.as_deref()))
            .collect();
        let mut resolved_names: HashMap<QuestId, String> = HashMap::new();
        let mut graph = PrerequisiteGraph::new();

        for quest in catalog {
            let mut seen = HashSet::new();
            let mut edges = Vec::new();

            for required_id in quest.required_quest_ids() {
                if !seen.insert(required_id.clone()) {
                    continue;
                }
                let name = match resolved_names.get(&required_id) {
                    Some(name) => name.clone(),
                    None => {
                        let catalog_name = catalog_names.get(&required_id).copied().flatten();
                        let name = quest_display_name(
                            self.profiles.as_ref(),
                            sample_profile,
                            &required_id,
                            catalog_name,
                        )
                        .await;
                        resolved_names.insert(required_id.clone(), name.clone());
                        name
                    }
                };
                edges.push(PrerequisiteEdge::new(quest.id.clone(), required_id, name));
            }

            graph.insert(quest.id.clone(), edges);
        }

        graph
    }
}
