//! Storage layer for game records.
//!
//! - [`RecordStore`]: the key-value contract the service consumes
//! - [`engines`]: concrete backends (in-memory `DashMap`, embedded redb)
//! - [`RecordStoreFactory`]: builds the configured backend from [`StorageConfig`]

pub mod engines;
pub mod factory;
pub mod record_store;

pub use factory::*;
pub use record_store::*;
