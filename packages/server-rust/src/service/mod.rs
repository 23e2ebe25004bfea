//! Game record service: lifecycle rules, team queries, and head-to-head
//! aggregation on top of a [`RecordStore`](crate::storage::RecordStore).

pub mod error;
pub mod game;

pub use error::GameError;
pub use game::GameRecordService;
