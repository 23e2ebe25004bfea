//! Gamebook core: game records, typed scan filters, and head-to-head tallies.

pub mod filter;
pub mod head_to_head;
pub mod types;

pub use filter::{GameField, GameFilter};
pub use head_to_head::{HeadToHead, WinTally};
pub use types::GameRecord;
