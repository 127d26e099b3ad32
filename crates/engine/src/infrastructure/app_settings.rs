//! Status engine settings.
//!
//! Tunables for the prerequisite graph cache and blocker search, plus the
//! profile filter. Loaded from the environment at startup; every value has a
//! default and an unparsable value falls back to it with a warning.
//!
//! | variable | default |
//! |---|---|
//! | `QUESTGATE_CACHE_TTL_SECONDS` | 300 |
//! | `QUESTGATE_MAX_TRAVERSAL_DEPTH` | 500 |
//! | `QUESTGATE_PROMOTE_SATISFIED_LOCKED` | true |
//! | `QUESTGATE_EXCLUDED_PROFILE_PREFIXES` | `headless_` |

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const ENV_CACHE_TTL_SECONDS: &str = "QUESTGATE_CACHE_TTL_SECONDS";
pub const ENV_MAX_TRAVERSAL_DEPTH: &str = "QUESTGATE_MAX_TRAVERSAL_DEPTH";
pub const ENV_PROMOTE_SATISFIED_LOCKED: &str = "QUESTGATE_PROMOTE_SATISFIED_LOCKED";
pub const ENV_EXCLUDED_PROFILE_PREFIXES: &str = "QUESTGATE_EXCLUDED_PROFILE_PREFIXES";

fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_max_traversal_depth() -> usize {
    500
}
fn default_promote_satisfied_locked() -> bool {
    true
}
fn default_excluded_profile_prefixes() -> Vec<String> {
    vec!["headless_".to_string()]
}

/// All configurable status engine settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusEngineSettings {
    /// Age after which the prerequisite graph is rebuilt
    #[serde(default = "default_cache_ttl_secs")]
    cache_ttl_secs: u64,

    /// Recursion limit for the blocker-chain search
    #[serde(default = "default_max_traversal_depth")]
    max_traversal_depth: usize,

    /// Report locked quests whose quest prerequisites are all complete as
    /// available. Turn off when level/reputation locks must be preserved.
    #[serde(default = "default_promote_satisfied_locked")]
    promote_satisfied_locked: bool,

    /// Profiles whose id or name starts with one of these are never reported
    #[serde(default = "default_excluded_profile_prefixes")]
    excluded_profile_prefixes: Vec<String>,
}

impl Default for StatusEngineSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            max_traversal_depth: default_max_traversal_depth(),
            promote_satisfied_locked: default_promote_satisfied_locked(),
            excluded_profile_prefixes: default_excluded_profile_prefixes(),
        }
    }
}

impl StatusEngineSettings {
    /// Load settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup (environment, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let excluded_profile_prefixes = match lookup(ENV_EXCLUDED_PROFILE_PREFIXES) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.excluded_profile_prefixes,
        };

        Self {
            cache_ttl_secs: parse_or_default(
                &lookup,
                ENV_CACHE_TTL_SECONDS,
                defaults.cache_ttl_secs,
            ),
            max_traversal_depth: parse_or_default(
                &lookup,
                ENV_MAX_TRAVERSAL_DEPTH,
                defaults.max_traversal_depth,
            ),
            promote_satisfied_locked: parse_or_default(
                &lookup,
                ENV_PROMOTE_SATISFIED_LOCKED,
                defaults.promote_satisfied_locked,
            ),
            excluded_profile_prefixes,
        }
    }

    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.cache_ttl_secs = secs;
        self
    }

    pub fn with_max_traversal_depth(mut self, depth: usize) -> Self {
        self.max_traversal_depth = depth;
        self
    }

    pub fn with_promote_satisfied_locked(mut self, promote: bool) -> Self {
        self.promote_satisfied_locked = promote;
        self
    }

    pub fn with_excluded_profile_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.excluded_profile_prefixes = prefixes;
        self
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_secs
    }

    pub fn max_traversal_depth(&self) -> usize {
        self.max_traversal_depth
    }

    pub fn promote_satisfied_locked(&self) -> bool {
        self.promote_satisfied_locked
    }

    pub fn excluded_profile_prefixes(&self) -> &[String] {
        &self.excluded_profile_prefixes
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, default = %default, "Invalid setting, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let settings = StatusEngineSettings::default();
        assert_eq!(settings.cache_ttl(), Duration::from_secs(300));
        assert_eq!(settings.max_traversal_depth(), 500);
        assert!(settings.promote_satisfied_locked());
        assert_eq!(settings.excluded_profile_prefixes(), ["headless_".to_string()]);
    }

    #[test]
    fn reads_overrides_from_lookup() {
        let settings = StatusEngineSettings::from_lookup(lookup_from(&[
            (ENV_CACHE_TTL_SECONDS, "60"),
            (ENV_MAX_TRAVERSAL_DEPTH, "32"),
            (ENV_PROMOTE_SATISFIED_LOCKED, "false"),
            (ENV_EXCLUDED_PROFILE_PREFIXES, "headless_, bot_ ,"),
        ]));

        assert_eq!(settings.cache_ttl_secs(), 60);
        assert_eq!(settings.max_traversal_depth(), 32);
        assert!(!settings.promote_satisfied_locked());
        assert_eq!(
            settings.excluded_profile_prefixes(),
            ["headless_".to_string(), "bot_".to_string()]
        );
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let settings = StatusEngineSettings::from_lookup(lookup_from(&[
            (ENV_CACHE_TTL_SECONDS, "five minutes"),
            (ENV_PROMOTE_SATISFIED_LOCKED, "maybe"),
        ]));

        assert_eq!(settings.cache_ttl_secs(), 300);
        assert!(settings.promote_satisfied_locked());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: StatusEngineSettings =
            serde_json::from_str(r#"{ "max_traversal_depth": 10 }"#).unwrap();
        assert_eq!(settings.max_traversal_depth(), 10);
        assert_eq!(settings.cache_ttl_secs(), 300);
    }
}
