//! Factory for creating the configured [`RecordStore`] backend.
//!
//! [`RecordStoreFactory`] is the dependency injection point between
//! configuration and [`GameRecordService`](crate::service::GameRecordService):
//! it turns a [`StorageConfig`] into a shared `Arc<dyn RecordStore>`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::storage::engines::HashMapRecordStore;
use crate::storage::record_store::RecordStore;

/// Which backend holds game records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// In-memory `DashMap`; contents are lost on restart.
    #[default]
    Memory,
    /// Embedded redb database file at `path`.
    Redb { path: PathBuf },
}

/// Storage configuration for the server.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// Creates [`RecordStore`] instances from a [`StorageConfig`].
pub struct RecordStoreFactory {
    config: StorageConfig,
}

impl RecordStoreFactory {
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Opens the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the redb file cannot be opened, or if the redb
    /// backend is requested but the `redb` feature is disabled.
    pub fn create(&self) -> anyhow::Result<Arc<dyn RecordStore>> {
        let store: Arc<dyn RecordStore> = match &self.config.backend {
            StorageBackend::Memory => Arc::new(HashMapRecordStore::new()),
            StorageBackend::Redb { path } => open_redb(path)?,
        };
        info!(backend = store.backend(), "record store ready");
        Ok(store)
    }
}

#[cfg(feature = "redb")]
fn open_redb(path: &std::path::Path) -> anyhow::Result<Arc<dyn RecordStore>> {
    Ok(Arc::new(crate::storage::engines::RedbRecordStore::open(path)?))
}

#[cfg(not(feature = "redb"))]
fn open_redb(path: &std::path::Path) -> anyhow::Result<Arc<dyn RecordStore>> {
    anyhow::bail!(
        "redb backend requested for {} but the `redb` feature is disabled",
        path.display()
    )
}
