//! Resolve quest statuses use case.
//!
//! Produces the effective status of every catalog quest for every tracked
//! player profile, with a locked reason where a quest is held back by
//! unfinished prerequisites.
//!
//! Every failure is recovered at the smallest possible scope: a bad status
//! lookup degrades one quest, an unreadable catalog or profile list yields
//! an empty report. The use case itself never fails.

use std::sync::Arc;

use futures_util::future::join_all;
use questgate_domain::{PrerequisiteGraph, Profile, Quest, QuestStatus};
use questgate_shared::{ProfileQuestStatuses, QuestStatusEntry, QuestStatusReport};

use super::blockers::{BlockerSearch, LockedReason, StatusSnapshot};
use super::graph_cache::PrerequisiteGraphCache;
use super::names::quest_display_name;
use crate::infrastructure::app_settings::StatusEngineSettings;
use crate::infrastructure::ports::{ProfileRepo, QuestCatalogRepo};

/// Resolve quest statuses use case.
///
/// Orchestrates: catalog/profile loading, graph refresh, per-profile status
/// capture, blocker search, status correction and report assembly.
pub struct ResolveQuestStatuses {
    catalog: Arc<dyn QuestCatalogRepo>,
    profiles: Arc<dyn ProfileRepo>,
    graph_cache: Arc<PrerequisiteGraphCache>,
    settings: StatusEngineSettings,
}

impl ResolveQuestStatuses {
    pub fn new(
        catalog: Arc<dyn QuestCatalogRepo>,
        profiles: Arc<dyn ProfileRepo>,
        graph_cache: Arc<PrerequisiteGraphCache>,
        settings: StatusEngineSettings,
    ) -> Self {
        Self {
            catalog,
            profiles,
            graph_cache,
            settings,
        }
    }

    /// Load catalog and profiles from the source and resolve everything.
    pub async fn execute(&self) -> QuestStatusReport {
        let catalog = match self.catalog.list_quests().await {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load quest catalog, returning empty report");
                return QuestStatusReport::new();
            }
        };

        let profiles = match self.profiles.list_profiles().await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list profiles, returning empty report");
                return QuestStatusReport::new();
            }
        };

        self.resolve_all(&profiles, &catalog).await
    }

    /// Resolve every catalog quest for every tracked profile.
    ///
    /// System/bot profiles and profiles without a display name are skipped.
    pub async fn resolve_all(&self, profiles: &[Profile], catalog: &[Quest]) -> QuestStatusReport {
        let tracked: Vec<&Profile> = profiles
            .iter()
            .filter(|profile| self.is_tracked(profile))
            .collect();

        let graph = self
            .graph_cache
            .current(catalog, tracked.first().copied())
            .await;

        let resolved = join_all(
            tracked
                .iter()
                .map(|profile| self.resolve_profile(profile, catalog, &graph)),
        )
        .await;

        let mut report = QuestStatusReport::new();
        for (profile, quests) in tracked.iter().zip(resolved) {
            if let Some(name) = profile.player_name() {
                if report.profile(name).is_some() {
                    tracing::warn!(
                        profile_id = %profile.id,
                        display_name = name,
                        "Duplicate display name, later profile replaces earlier one"
                    );
                }
                report.insert_profile(name, quests);
            }
        }
        report
    }

    fn is_tracked(&self, profile: &Profile) -> bool {
        if profile.matches_any_prefix(self.settings.excluded_profile_prefixes()) {
            tracing::debug!(profile_id = %profile.id, "Skipping excluded profile");
            return false;
        }
        if profile.player_name().is_none() {
            tracing::debug!(profile_id = %profile.id, "Skipping profile without display name");
            return false;
        }
        true
    }

    async fn resolve_profile(
        &self,
        profile: &Profile,
        catalog: &[Quest],
        graph: &PrerequisiteGraph,
    ) -> ProfileQuestStatuses {
        let mut snapshot = StatusSnapshot::new();
        let mut raw_statuses = Vec::with_capacity(catalog.len());
        for quest in catalog {
            match self.profiles.quest_status(profile, &quest.id).await {
                Ok(status) => {
                    snapshot.insert(quest.id.clone(), status);
                    raw_statuses.push(Some(status));
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        profile_id = %profile.id,
                        quest_id = %quest.id,
                        "Quest status lookup failed, reporting as locked"
                    );
                    raw_statuses.push(None);
                }
            }
        }

        let mut search = BlockerSearch::new(graph, &snapshot, self.settings.max_traversal_depth());
        let mut quests = ProfileQuestStatuses::new();

        for (quest, raw) in catalog.iter().zip(raw_statuses) {
            let Some(raw) = raw else {
                quests.insert(
                    quest.id.to_string(),
                    QuestStatusEntry::degraded(quest.id.as_str()),
                );
                continue;
            };

            let quest_name = quest_display_name(
                self.profiles.as_ref(),
                Some(profile),
                &quest.id,
                quest.name.as_deref(),
            )
            .await;

            let entry = if raw.is_locked() {
                let reason = search.locked_reason(&quest.id);
                self.apply_correction_policy(&reason, quest_name)
            } else {
                QuestStatusEntry::new(raw, quest_name)
            };

            if entry.status != raw {
                tracing::debug!(
                    profile_id = %profile.id,
                    quest_id = %quest.id,
                    raw = %raw,
                    effective = %entry.status,
                    "Locked quest has all prerequisites complete, reporting as available"
                );
            }
            quests.insert(quest.id.to_string(), entry);
        }

        quests
    }

    /// Decide the reported entry for a quest the source says is locked.
    ///
    /// A quest whose quest prerequisites are all complete is promoted to
    /// available unless the setting is off: the source can lag behind the
    /// completion of the last prerequisite.
    fn apply_correction_policy(&self, reason: &LockedReason, quest_name: String) -> QuestStatusEntry {
        match reason {
            LockedReason::NoQuestPrerequisites => {
                QuestStatusEntry::new(QuestStatus::Locked, quest_name)
            }
            LockedReason::PrerequisitesMet if self.settings.promote_satisfied_locked() => {
                QuestStatusEntry::new(QuestStatus::Available, quest_name)
            }
            LockedReason::PrerequisitesMet => QuestStatusEntry::new(QuestStatus::Locked, quest_name),
            LockedReason::Blocked(message) => {
                QuestStatusEntry::new(QuestStatus::Locked, quest_name).with_locked_reason(message)
            }
        }
    }
}
