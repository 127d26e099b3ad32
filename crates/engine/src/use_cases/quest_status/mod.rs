//! Quest status use cases.

mod blockers;
mod graph_cache;
mod names;
mod resolve;

pub use blockers::{BlockerSearch, LockedReason, StatusSnapshot};
pub use graph_cache::PrerequisiteGraphCache;
pub use names::quest_display_name;
pub use resolve::ResolveQuestStatuses;

use std::sync::Arc;

/// Container for quest status use cases.
pub struct QuestStatusUseCases {
    pub resolve: Arc<ResolveQuestStatuses>,
}

impl QuestStatusUseCases {
    pub fn new(resolve: Arc<ResolveQuestStatuses>) -> Self {
        Self { resolve }
    }
}
