//! HTTP routes.

use axum::{extract::State, routing::get, Json, Router};
use questgate_shared::QuestStatusReport;
use std::sync::Arc;

use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/quest-statuses", get(quest_statuses))
}

async fn health() -> &'static str {
    "OK"
}

/// Effective status of every catalog quest for every tracked profile.
///
/// Always succeeds; source failures surface as missing entries or an empty
/// object and are logged server-side.
async fn quest_statuses(State(app): State<Arc<App>>) -> Json<QuestStatusReport> {
    let report = app.use_cases.quest_status.resolve.execute().await;
    tracing::debug!(profiles = report.len(), "Served quest status report");
    Json(report)
}
