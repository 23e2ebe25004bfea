//! Game record endpoints under `/v1/game`.
//!
//! Thin glue: each handler calls one [`GameRecordService`](crate::service::GameRecordService)
//! operation and maps its outcome to a status code.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gamebook_core::{GameRecord, HeadToHead};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, trace};

use super::AppState;
use crate::service::GameError;

/// Handler error, rendered as a status code plus a JSON `{"error": ...}` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Game(GameError::Conflict { .. }) => StatusCode::CONFLICT,
            Self::Game(GameError::NotFound { .. }) => StatusCode::NOT_FOUND,
            // No shared games is an empty result, not a failure.
            Self::Game(GameError::NoHistory { .. }) => {
                return StatusCode::NO_CONTENT.into_response();
            }
            Self::Game(GameError::StoreUnavailable(e)) => {
                error!(error = %format!("{e:#}"), "record store unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `?teamName=` query for the single-team listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamQuery {
    pub team_name: String,
}

const TEAM_NAME_PARAM: &str = "teamName";

fn list_response(games: Vec<GameRecord>) -> Response {
    if games.is_empty() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(games).into_response()
    }
}

/// `GET /v1/game`
pub async fn list_games(State(state): State<AppState>) -> Result<Response, ApiError> {
    trace!("list_games");
    Ok(list_response(state.games.list_all().await?))
}

/// `GET /v1/game/?teamName=T`
pub async fn list_games_by_team(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Result<Response, ApiError> {
    trace!(team = %query.team_name, "list_games_by_team");
    Ok(list_response(
        state.games.list_by_team(&query.team_name).await?,
    ))
}

/// `GET /v1/game/head2head?teamName=A&teamName=B`
///
/// The repeated parameter is read as raw pairs because the two team names
/// share one key.
pub async fn head_to_head(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<HeadToHead>, ApiError> {
    let teams: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == TEAM_NAME_PARAM)
        .map(|(_, value)| value.as_str())
        .collect();
    let [team1, team2] = teams.as_slice() else {
        return Err(ApiError::BadRequest(format!(
            "expected exactly two {TEAM_NAME_PARAM} parameters, got {}",
            teams.len()
        )));
    };
    trace!(team1, team2, "head_to_head");
    Ok(Json(state.games.compute_head_to_head(team1, team2).await?))
}

/// `GET /v1/game/{id}`
pub async fn read_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameRecord>, ApiError> {
    trace!(%id, "read_game");
    Ok(Json(state.games.read(&id).await?))
}

/// `POST /v1/game`
pub async fn create_game(
    State(state): State<AppState>,
    Json(game): Json<GameRecord>,
) -> Result<(StatusCode, Json<GameRecord>), ApiError> {
    trace!(?game, "create_game");
    if game.id.trim().is_empty() {
        return Err(ApiError::BadRequest("game id must not be blank".to_string()));
    }
    let created = state.games.create(game).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /v1/game/{id}`: full replace. The path id overrides any body id.
pub async fn put_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(game): Json<GameRecord>,
) -> Result<Json<GameRecord>, ApiError> {
    trace!(%id, ?game, "put_game");
    Ok(Json(state.games.replace(game.with_id(id)).await?))
}

/// `PATCH /v1/game/{id}`: partial merge. The path id overrides any body id.
pub async fn patch_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(game): Json<GameRecord>,
) -> Result<Json<GameRecord>, ApiError> {
    trace!(%id, ?game, "patch_game");
    Ok(Json(state.games.update(game.with_id(id)).await?))
}

/// `DELETE /v1/game/{id}`
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    trace!(%id, "delete_game");
    state.games.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
