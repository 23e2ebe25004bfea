//! Persistent [`RecordStore`] implementation backed by an embedded [`redb`] file.
//!
//! Records live in a single `games` table, keyed by id, with `MsgPack`-encoded
//! values. redb calls block, so each operation runs on the Tokio blocking
//! pool in its own transaction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use gamebook_core::{GameFilter, GameRecord};
use redb::{Database, ReadableTable, TableDefinition};
use tracing::{debug, trace};

use crate::storage::record_store::RecordStore;

const GAMES: TableDefinition<&str, &[u8]> = TableDefinition::new("games");

/// Game storage persisted to a single redb database file.
///
/// Every `put`/`delete` commits its own write transaction, so a completed
/// call is durable and visible to later reads. `scan` runs inside one read
/// transaction and therefore sees a consistent snapshot, which is stronger
/// than [`RecordStore`] requires.
pub struct RedbRecordStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbRecordStore {
    /// Opens (or creates) the database at `path` and ensures the `games`
    /// table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a redb
    /// database, or if the table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let db = Database::create(&path)
            .with_context(|| format!("failed to open redb database at {}", path.display()))?;

        // Create the table up front so read transactions never hit
        // `TableDoesNotExist` on a fresh file.
        let txn = db.begin_write()?;
        txn.open_table(GAMES)?;
        txn.commit()?;

        debug!(path = %path.display(), "opened redb record store");
        Ok(Self {
            db: Arc::new(db),
            path,
        })
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `f` against the database on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .context("redb worker task failed")?
    }
}

#[async_trait]
impl RecordStore for RedbRecordStore {
    async fn get(&self, id: &str) -> anyhow::Result<Option<GameRecord>> {
        trace!(id, "redb get");
        let id = id.to_string();
        self.blocking(move |db| {
            let txn = db.begin_read()?;
            let table = txn.open_table(GAMES)?;
            let Some(value) = table.get(id.as_str())? else {
                return Ok(None);
            };
            let record = GameRecord::from_msgpack(value.value())
                .with_context(|| format!("corrupt game record {id}"))?;
            Ok(Some(record))
        })
        .await
    }

    async fn put(&self, record: &GameRecord) -> anyhow::Result<()> {
        trace!(id = %record.id, "redb put");
        let id = record.id.clone();
        let bytes = record
            .to_msgpack()
            .with_context(|| format!("failed to encode game record {id}"))?;
        self.blocking(move |db| {
            let txn = db.begin_write()?;
            {
                let mut table = txn.open_table(GAMES)?;
                table.insert(id.as_str(), bytes.as_slice())?;
            }
            txn.commit()?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &str) -> anyhow::Result<()> {
        trace!(id, "redb delete");
        let id = id.to_string();
        self.blocking(move |db| {
            let txn = db.begin_write()?;
            {
                let mut table = txn.open_table(GAMES)?;
                table.remove(id.as_str())?;
            }
            txn.commit()?;
            Ok(())
        })
        .await
    }

    async fn scan(&self, filter: &GameFilter) -> anyhow::Result<Vec<GameRecord>> {
        trace!(?filter, "redb scan");
        let filter = filter.clone();
        self.blocking(move |db| {
            let txn = db.begin_read()?;
            let table = txn.open_table(GAMES)?;
            let mut matched = Vec::new();
            for entry in table.iter()? {
                let (key, value) = entry?;
                let record = GameRecord::from_msgpack(value.value())
                    .with_context(|| format!("corrupt game record {}", key.value()))?;
                if filter.matches(&record) {
                    matched.push(record);
                }
            }
            Ok(matched)
        })
        .await
    }

    fn backend(&self) -> &'static str {
        "redb"
    }
}
