//! [`RecordStore`](super::RecordStore) backends.
//!
//! - [`HashMapRecordStore`]: in-memory, for tests and ephemeral deployments
//! - [`RedbRecordStore`]: embedded persistent store (feature `redb`)

mod hashmap;
#[cfg(feature = "redb")]
mod redb_store;

pub use hashmap::HashMapRecordStore;
#[cfg(feature = "redb")]
pub use redb_store::RedbRecordStore;
