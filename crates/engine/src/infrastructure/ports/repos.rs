//! Repository port traits for the quest/profile source.
//!
//! The engine only ever reads through these; it never mutates the source.

use async_trait::async_trait;
use questgate_domain::{Profile, Quest, QuestId, QuestStatus};

use super::error::RepoError;

// =============================================================================
// Quest Catalog
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestCatalogRepo: Send + Sync {
    /// Every quest in the shared catalog, in catalog order.
    async fn list_quests(&self) -> Result<Vec<Quest>, RepoError>;
}

// =============================================================================
// Profiles
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    /// All known profiles, including system/bot accounts.
    async fn list_profiles(&self) -> Result<Vec<Profile>, RepoError>;

    /// Raw status of a quest as the source currently reports it.
    async fn quest_status(
        &self,
        profile: &Profile,
        quest_id: &QuestId,
    ) -> Result<QuestStatus, RepoError>;

    /// Localized quest name in the profile's language, if one exists.
    /// May return placeholder strings; callers apply the display-name fallback.
    async fn localized_quest_name(
        &self,
        profile: &Profile,
        quest_id: &QuestId,
    ) -> Result<Option<String>, RepoError>;
}
