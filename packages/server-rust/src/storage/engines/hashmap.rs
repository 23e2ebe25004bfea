//! In-memory [`RecordStore`] implementation backed by [`DashMap`].
//!
//! Provides concurrent read/write access without external locking.
//! Suitable for development, tests, and deployments that do not need
//! records to survive a restart.

use async_trait::async_trait;
use dashmap::DashMap;
use gamebook_core::{GameFilter, GameRecord};
use tracing::trace;

use crate::storage::record_store::RecordStore;

/// In-memory game storage backed by [`DashMap`].
///
/// Each key lives in one `DashMap` shard, so `put`/`delete`/`get` are
/// atomic per key. `scan` walks the shards one at a time and may observe
/// writes that land mid-scan on some keys but not others.
pub struct HashMapRecordStore {
    entries: DashMap<String, GameRecord>,
}

impl HashMapRecordStore {
    /// Creates a new, empty `HashMapRecordStore`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HashMapRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for HashMapRecordStore {
    async fn get(&self, id: &str) -> anyhow::Result<Option<GameRecord>> {
        trace!(id, "hashmap get");
        Ok(self.entries.get(id).map(|r| r.value().clone()))
    }

    async fn put(&self, record: &GameRecord) -> anyhow::Result<()> {
        trace!(id = %record.id, "hashmap put");
        self.entries.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        trace!(id, "hashmap delete");
        self.entries.remove(id);
        Ok(())
    }

    async fn scan(&self, filter: &GameFilter) -> anyhow::Result<Vec<GameRecord>> {
        trace!(?filter, "hashmap scan");
        Ok(self
            .entries
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: &str, home: &str, away: &str) -> GameRecord {
        GameRecord::new(id).with_home_team(home).with_away_team(away)
    }

    #[tokio::test]
    async fn put_get_delete_round_trip() {
        let store = HashMapRecordStore::new();
        let record = game("g1", "team1", "team2").with_week("4");

        store.put(&record).await.unwrap();
        assert_eq!(store.get("g1").await.unwrap(), Some(record));

        store.delete("g1").await.unwrap();
        assert!(store.get("g1").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let store = HashMapRecordStore::new();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_existing_record() {
        let store = HashMapRecordStore::new();
        store.put(&game("g1", "a", "b")).await.unwrap();
        store.put(&GameRecord::new("g1").with_year("2019")).await.unwrap();

        let stored = store.get("g1").await.unwrap().unwrap();
        assert_eq!(stored.year.as_deref(), Some("2019"));
        assert!(stored.home_team.is_none());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_key_is_ok() {
        let store = HashMapRecordStore::new();
        assert!(store.delete("nope").await.is_ok());
    }

    #[tokio::test]
    async fn scan_applies_filter() {
        let store = HashMapRecordStore::new();
        store.put(&game("1", "a", "b")).await.unwrap();
        store.put(&game("2", "b", "c")).await.unwrap();
        store.put(&game("3", "c", "a")).await.unwrap();

        let mut ids: Vec<String> = store
            .scan(&GameFilter::team("a"))
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "3"]);

        assert_eq!(store.scan(&GameFilter::All).await.unwrap().len(), 3);
        assert!(store
            .scan(&GameFilter::team_pair("a", "z"))
            .await
            .unwrap()
            .is_empty());
    }
}
