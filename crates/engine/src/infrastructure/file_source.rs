//! File-backed quest catalog and profile source.
//!
//! Reads a server data dump laid out as:
//!
//! ```text
//! <data_dir>/
//!   quests.json          array of catalog quests
//!   locales.json         { "<questId> name": "Localized name", ... } (optional)
//!   profiles/*.json      { "info": { "id", "nickname" }, "quests": [ { "qid", "status" } ] }
//! ```
//!
//! Quests and profiles are re-read on every listing so that edits made by the
//! game server show up on the next query. The locale table is large and
//! rarely changes; it is kept in memory and reloaded when its modification
//! time moves.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use questgate_domain::{Profile, Quest, QuestId, QuestStatus};
use serde::Deserialize;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{ProfileRepo, QuestCatalogRepo, RepoError};

const QUESTS_FILE: &str = "quests.json";
const LOCALES_FILE: &str = "locales.json";
const PROFILES_DIR: &str = "profiles";

#[derive(Debug, Deserialize)]
struct ProfileFile {
    info: ProfileInfo,
    #[serde(default)]
    quests: Vec<QuestRecord>,
}

#[derive(Debug, Deserialize)]
struct ProfileInfo {
    id: String,
    #[serde(default)]
    nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestRecord {
    qid: String,
    status: Value,
}

struct LocaleTable {
    modified: Option<SystemTime>,
    names: Arc<HashMap<String, String>>,
}

pub struct FileQuestSource {
    data_dir: PathBuf,
    locales: Mutex<Option<LocaleTable>>,
}

impl FileQuestSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            locales: Mutex::new(None),
        }
    }

    async fn locale_names(&self) -> Result<Arc<HashMap<String, String>>, RepoError> {
        let path = self.data_dir.join(LOCALES_FILE);
        let modified = match fs::metadata(&path).await {
            Ok(metadata) => metadata.modified().ok(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Arc::new(HashMap::new()));
            }
            Err(e) => return Err(RepoError::unavailable("localized_quest_name", e)),
        };

        let mut cached = self.locales.lock().await;
        if let Some(table) = cached.as_ref() {
            if modified.is_some() && table.modified == modified {
                return Ok(table.names.clone());
            }
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| RepoError::unavailable("localized_quest_name", e))?;
        let names: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| RepoError::serialization(format!("{}: {}", LOCALES_FILE, e)))?;
        let names = Arc::new(names);

        tracing::debug!(entries = names.len(), path = %path.display(), "Loaded quest locale table");
        *cached = Some(LocaleTable {
            modified,
            names: names.clone(),
        });
        Ok(names)
    }

    async fn read_profile(path: &Path) -> Result<Profile, RepoError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RepoError::unavailable("list_profiles", e))?;
        let file: ProfileFile = serde_json::from_str(&content)
            .map_err(|e| RepoError::serialization(format!("{}: {}", path.display(), e)))?;

        let mut profile = Profile::new(file.info.id);
        if let Some(nickname) = file.info.nickname {
            profile = profile.with_display_name(nickname);
        }

        for record in file.quests {
            match parse_status(&record.status) {
                Some(status) => {
                    profile.quests.insert(QuestId::new(record.qid), status);
                }
                None => {
                    tracing::warn!(
                        profile_id = %profile.id,
                        quest_id = %record.qid,
                        status = %record.status,
                        "Unknown quest status, ignoring record"
                    );
                }
            }
        }
        Ok(profile)
    }
}

/// Accepts the numeric wire tag or the upstream status name.
fn parse_status(raw: &Value) -> Option<QuestStatus> {
    match raw {
        Value::Number(n) => n
            .as_u64()
            .and_then(|tag| u8::try_from(tag).ok())
            .and_then(|tag| QuestStatus::try_from(tag).ok()),
        Value::String(name) => match name.as_str() {
            "Locked" => Some(QuestStatus::Locked),
            "AvailableForStart" | "Available" => Some(QuestStatus::Available),
            "Started" => Some(QuestStatus::Started),
            "AvailableForFinish" => Some(QuestStatus::AvailableForFinish),
            "Success" => Some(QuestStatus::Success),
            "Fail" => Some(QuestStatus::Fail),
            "FailRestartable" => Some(QuestStatus::FailRestartable),
            "MarkedAsFailed" => Some(QuestStatus::Fail2),
            "Expired" => Some(QuestStatus::Expired),
            "AvailableAfter" => Some(QuestStatus::TimeExpired),
            _ => None,
        },
        _ => None,
    }
}

#[async_trait]
impl QuestCatalogRepo for FileQuestSource {
    async fn list_quests(&self) -> Result<Vec<Quest>, RepoError> {
        let path = self.data_dir.join(QUESTS_FILE);
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| RepoError::unavailable("list_quests", format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| RepoError::serialization(format!("{}: {}", QUESTS_FILE, e)))
    }
}

#[async_trait]
impl ProfileRepo for FileQuestSource {
    async fn list_profiles(&self) -> Result<Vec<Profile>, RepoError> {
        let dir = self.data_dir.join(PROFILES_DIR);
        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| RepoError::unavailable("list_profiles", format!("{}: {}", dir.display(), e)))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepoError::unavailable("list_profiles", e))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut profiles = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::read_profile(&path).await {
                Ok(profile) => profiles.push(profile),
                Err(e) => {
                    tracing::warn!(error = %e, path = %path.display(), "Skipping unreadable profile");
                }
            }
        }
        Ok(profiles)
    }

    async fn quest_status(
        &self,
        profile: &Profile,
        quest_id: &QuestId,
    ) -> Result<QuestStatus, RepoError> {
        Ok(profile.recorded_status(quest_id))
    }

    async fn localized_quest_name(
        &self,
        _profile: &Profile,
        quest_id: &QuestId,
    ) -> Result<Option<String>, RepoError> {
        let names = self.locale_names().await?;
        Ok(names.get(&format!("{} name", quest_id)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.unwrap();
        }
        fs::write(path, content).await.unwrap();
    }

    #[tokio::test]
    async fn reads_catalog_in_file_order() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            QUESTS_FILE,
            r#"[
                { "_id": "q2", "QuestName": "Checking", "conditions": { "AvailableForStart": [
                    { "conditionType": "Quest", "target": "q1" }
                ] } },
                { "_id": "q1", "QuestName": "Debut" }
            ]"#,
        )
        .await;
        let source = FileQuestSource::new(dir.path());

        let quests = source.list_quests().await.unwrap();

        let ids: Vec<_> = quests.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q2", "q1"]);
        assert_eq!(quests[0].required_quest_ids(), vec![QuestId::from("q1")]);
    }

    #[tokio::test]
    async fn missing_catalog_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = FileQuestSource::new(dir.path());

        let err = source.list_quests().await.unwrap_err();
        assert!(matches!(err, RepoError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn malformed_catalog_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), QUESTS_FILE, "{ not json").await;
        let source = FileQuestSource::new(dir.path());

        let err = source.list_quests().await.unwrap_err();
        assert!(matches!(err, RepoError::Serialization(_)));
    }

    #[tokio::test]
    async fn lists_profiles_and_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "profiles/a.json",
            r#"{ "info": { "id": "pmc-1", "nickname": "PlayerOne" },
                 "quests": [
                    { "qid": "q1", "status": 4 },
                    { "qid": "q2", "status": "Started" },
                    { "qid": "q3", "status": "Mystery" }
                 ] }"#,
        )
        .await;
        write(dir.path(), "profiles/b.json", "garbage").await;
        write(
            dir.path(),
            "profiles/c.json",
            r#"{ "info": { "id": "headless_1" } }"#,
        )
        .await;
        write(dir.path(), "profiles/notes.txt", "ignored").await;
        let source = FileQuestSource::new(dir.path());

        let profiles = source.list_profiles().await.unwrap();

        assert_eq!(profiles.len(), 2);
        let player = &profiles[0];
        assert_eq!(player.player_name(), Some("PlayerOne"));
        assert_eq!(
            source.quest_status(player, &QuestId::from("q1")).await.unwrap(),
            QuestStatus::Success
        );
        assert_eq!(
            source.quest_status(player, &QuestId::from("q2")).await.unwrap(),
            QuestStatus::Started
        );
        assert_eq!(
            source.quest_status(player, &QuestId::from("q3")).await.unwrap(),
            QuestStatus::Locked
        );
        assert_eq!(profiles[1].player_name(), None);
    }

    #[tokio::test]
    async fn missing_profiles_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = FileQuestSource::new(dir.path());

        assert!(source.list_profiles().await.is_err());
    }

    #[tokio::test]
    async fn localized_names_come_from_locale_table() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), LOCALES_FILE, r#"{ "q1 name": "Debut" }"#).await;
        let source = FileQuestSource::new(dir.path());
        let profile = Profile::new("pmc-1");

        let found = source
            .localized_quest_name(&profile, &QuestId::from("q1"))
            .await
            .unwrap();
        let missing = source
            .localized_quest_name(&profile, &QuestId::from("q2"))
            .await
            .unwrap();

        assert_eq!(found.as_deref(), Some("Debut"));
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn missing_locale_table_yields_no_names() {
        let dir = TempDir::new().unwrap();
        let source = FileQuestSource::new(dir.path());

        let name = source
            .localized_quest_name(&Profile::new("pmc-1"), &QuestId::from("q1"))
            .await
            .unwrap();
        assert_eq!(name, None);
    }

    #[test]
    fn parses_numeric_and_named_statuses() {
        assert_eq!(parse_status(&Value::from(0)), Some(QuestStatus::Locked));
        assert_eq!(parse_status(&Value::from(9)), Some(QuestStatus::TimeExpired));
        assert_eq!(parse_status(&Value::from(300)), None);
        assert_eq!(
            parse_status(&Value::from("AvailableForStart")),
            Some(QuestStatus::Available)
        );
        assert_eq!(
            parse_status(&Value::from("MarkedAsFailed")),
            Some(QuestStatus::Fail2)
        );
        assert_eq!(parse_status(&Value::Bool(true)), None);
    }
}
