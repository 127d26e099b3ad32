//! Quest display-name lookup shared by graph rebuilds and report assembly.

use questgate_domain::{display_name, Profile, QuestId};

use crate::infrastructure::ports::ProfileRepo;

/// Resolve the name shown for a quest.
///
/// Without a profile there is no localization context, so the id is used.
/// With one, the localized name wins, then the catalog name, then the id.
/// Lookup failures degrade to the next candidate.
pub async fn quest_display_name(
    profiles: &dyn ProfileRepo,
    profile: Option<&Profile>,
    quest_id: &QuestId,
    catalog_name: Option<&str>,
) -> String {
    let Some(profile) = profile else {
        return quest_id.to_string();
    };

    let localized = match profiles.localized_quest_name(profile, quest_id).await {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!(
                error = %e,
                quest_id = %quest_id,
                profile_id = %profile.id,
                "Quest name lookup failed, falling back to catalog name"
            );
            None
        }
    };

    display_name::resolve(quest_id, localized.as_deref(), catalog_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockProfileRepo, RepoError};

    #[tokio::test]
    async fn uses_id_without_profile() {
        let repo = MockProfileRepo::new();
        let name = quest_display_name(&repo, None, &QuestId::from("q1"), Some("Debut")).await;
        assert_eq!(name, "q1");
    }

    #[tokio::test]
    async fn lookup_failure_falls_back_to_catalog_name() {
        let mut repo = MockProfileRepo::new();
        repo.expect_localized_quest_name()
            .returning(|_, _| Err(RepoError::unavailable("locales", "missing")));

        let profile = Profile::new("p1");
        let name =
            quest_display_name(&repo, Some(&profile), &QuestId::from("q1"), Some("Debut")).await;
        assert_eq!(name, "Debut");
    }

    #[tokio::test]
    async fn placeholder_localization_is_ignored() {
        let mut repo = MockProfileRepo::new();
        repo.expect_localized_quest_name()
            .returning(|_, id| Ok(Some(format!("{} Name", id))));

        let profile = Profile::new("p1");
        let name = quest_display_name(&repo, Some(&profile), &QuestId::from("q1"), None).await;
        assert_eq!(name, "q1");
    }
}
