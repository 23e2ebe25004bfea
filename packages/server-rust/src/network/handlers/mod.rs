//! HTTP handler definitions for the Gamebook server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod games;
pub mod health;

pub use games::{
    create_game, delete_game, head_to_head, list_games, list_games_by_team, patch_game, put_game,
    read_game, ApiError,
};
pub use health::{health_handler, liveness_handler, readiness_handler};

use std::sync::Arc;
use std::time::Instant;

use super::{NetworkConfig, ShutdownController};
use crate::service::GameRecordService;

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Cloning is cheap: every field is an `Arc` or wraps one.
#[derive(Clone)]
pub struct AppState {
    /// Game record lifecycle and query operations.
    pub games: GameRecordService,
    /// Health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    pub config: Arc<NetworkConfig>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}
