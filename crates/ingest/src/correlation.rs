//! Run-scoped correlation cache.
//!
//! Some providers split one logical resource across two endpoints that share
//! no stable identifier: a schedule-type call enumerates events and returns
//! opaque native ids, and a later detail-type call needs exactly that id.
//! This cache bridges the two fetches for the lifetime of one process run.
//!
//! Each provider binding owns its own instance - entries from one provider
//! can never leak into another's lookups. The cache is volatile and
//! non-authoritative: it is never persisted and never explicitly cleared,
//! and a miss is an ordinary `None`, not an error.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};

use crate::models::GameKey;

/// Composite key bridging a schedule fetch and its dependent detail fetch.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CorrelationKey {
    pub season: u16,
    pub week: u8,
    /// Home team abbreviation.
    pub home_team: String,
}

impl From<&GameKey> for CorrelationKey {
    fn from(game: &GameKey) -> Self {
        Self {
            season: game.season,
            week: game.week,
            home_team: game.home_team.clone(),
        }
    }
}

impl std::fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} week {} {}", self.season, self.week, self.home_team)
    }
}

/// Map from domain composite key to provider-native identifier.
#[derive(Default)]
pub struct CorrelationCache {
    entries: Mutex<HashMap<CorrelationKey, String>>,
}

impl CorrelationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the entry map, recovering from poison if necessary.
    ///
    /// A stale correlation entry is recoverable; a panic is not.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<CorrelationKey, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Correlation cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Record a native id discovered during a schedule-type fetch.
    pub fn put(&self, key: CorrelationKey, native_id: impl Into<String>) {
        let native_id = native_id.into();
        debug!("Correlation cache: {} -> {}", key, native_id);
        self.lock_entries().insert(key, native_id);
    }

    /// Look up the native id for a dependent fetch. A miss is not an error.
    pub fn get(&self, key: &CorrelationKey) -> Option<String> {
        self.lock_entries().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(home: &str) -> CorrelationKey {
        CorrelationKey {
            season: 2024,
            week: 5,
            home_team: home.to_string(),
        }
    }

    #[test]
    fn test_put_then_get() {
        let cache = CorrelationCache::new();
        cache.put(key("KC"), "evt_8fa3");

        assert_eq!(cache.get(&key("KC")), Some("evt_8fa3".to_string()));
    }

    #[test]
    fn test_miss_returns_none() {
        let cache = CorrelationCache::new();
        assert_eq!(cache.get(&key("KC")), None);
    }

    #[test]
    fn test_overwrite_keeps_latest() {
        let cache = CorrelationCache::new();
        cache.put(key("KC"), "evt_old");
        cache.put(key("KC"), "evt_new");

        assert_eq!(cache.get(&key("KC")), Some("evt_new".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_instances_are_isolated() {
        let a = CorrelationCache::new();
        let b = CorrelationCache::new();
        a.put(key("KC"), "evt_8fa3");

        assert_eq!(b.get(&key("KC")), None);
    }

    #[test]
    fn test_key_from_game_key() {
        let game = GameKey {
            season: 2024,
            week: 5,
            home_team: "KC".to_string(),
            away_team: "DEN".to_string(),
        };
        let key = CorrelationKey::from(&game);

        assert_eq!(
            key,
            CorrelationKey {
                season: 2024,
                week: 5,
                home_team: "KC".to_string(),
            }
        );
        assert_eq!(key.to_string(), "2024 week 5 KC");
    }
}
