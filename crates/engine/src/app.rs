//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    app_settings::StatusEngineSettings,
    ports::{ClockPort, ProfileRepo, QuestCatalogRepo},
};
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub quest_status: use_cases::QuestStatusUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        catalog: Arc<dyn QuestCatalogRepo>,
        profiles: Arc<dyn ProfileRepo>,
        clock: Arc<dyn ClockPort>,
        settings: StatusEngineSettings,
    ) -> Self {
        let graph_cache = Arc::new(use_cases::quest_status::PrerequisiteGraphCache::new(
            profiles.clone(),
            clock,
            settings.cache_ttl(),
        ));
        let resolve = Arc::new(use_cases::quest_status::ResolveQuestStatuses::new(
            catalog,
            profiles,
            graph_cache,
            settings,
        ));

        Self {
            use_cases: UseCases {
                quest_status: use_cases::QuestStatusUseCases::new(resolve),
            },
        }
    }
}
