/// Outcomes of [`GameRecordService`](super::GameRecordService) operations
/// other than success.
///
/// `Conflict`, `NotFound` and `NoHistory` are expected results the caller
/// maps to a response. `StoreUnavailable` carries any backend failure
/// unchanged; the service never retries or suppresses it.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game {id} already exists")]
    Conflict { id: String },
    #[error("game {id} not found")]
    NotFound { id: String },
    #[error("no head-to-head history between {team1} and {team2}")]
    NoHistory { team1: String, team2: String },
    #[error("record store unavailable: {0:#}")]
    StoreUnavailable(#[from] anyhow::Error),
}

impl GameError {
    pub(crate) fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}
