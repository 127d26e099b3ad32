//! Quest display-name fallback.
//!
//! Upstream name lookups return placeholder strings for untranslated
//! quests (the raw locale key, or the literal `name`). Those are never shown.

use crate::QuestId;

/// Whether `candidate` is a usable name for `quest_id`.
pub fn is_meaningful(quest_id: &QuestId, candidate: &str) -> bool {
    let trimmed = candidate.trim();
    if trimmed.is_empty() || trimmed == "name" || trimmed == "Name" {
        return false;
    }
    trimmed != format!("{} Name", quest_id) && trimmed != format!("{} name", quest_id)
}

/// Pick the first meaningful name among the localized name and the catalog
/// name, falling back to the id.
pub fn resolve(quest_id: &QuestId, localized: Option<&str>, catalog_name: Option<&str>) -> String {
    [localized, catalog_name]
        .into_iter()
        .flatten()
        .find(|candidate| is_meaningful(quest_id, candidate))
        .map(|name| name.trim().to_string())
        .unwrap_or_else(|| quest_id.to_string())
}
