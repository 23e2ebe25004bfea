//! Game record store trait.
//!
//! Defines [`RecordStore`], the interface [`GameRecordService`](crate::service::GameRecordService)
//! uses to reach the key-value backend. Implementations live in
//! [`engines`](super::engines).

use async_trait::async_trait;
use gamebook_core::{GameFilter, GameRecord};

/// Key-value access to persisted [`GameRecord`]s, keyed by `id`.
///
/// Each call is a single backend round trip. Implementations provide
/// per-key atomicity (a completed `put` or `delete` is visible to every
/// later `get`) but no multi-key transactions and no snapshot isolation
/// across a `scan`. Retrying transient failures, if any, is the
/// implementation's job; callers treat every `Err` as the backend being
/// unavailable.
///
/// Used as `Arc<dyn RecordStore>`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup. A missing key is `Ok(None)`, never an error.
    async fn get(&self, id: &str) -> anyhow::Result<Option<GameRecord>>;

    /// Insert or overwrite the record stored under `record.id`.
    async fn put(&self, record: &GameRecord) -> anyhow::Result<()>;

    /// Remove the record stored under `id`. Removing a missing key succeeds.
    async fn delete(&self, id: &str) -> anyhow::Result<()>;

    /// Full-collection scan returning every record that matches `filter`.
    ///
    /// Result order is unspecified.
    async fn scan(&self, filter: &GameFilter) -> anyhow::Result<Vec<GameRecord>>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
