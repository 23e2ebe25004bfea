//! Game record lifecycle and query operations.

use std::sync::Arc;

use gamebook_core::{GameFilter, GameRecord, HeadToHead};
use tracing::{info, trace, warn};

use super::error::GameError;
use crate::storage::RecordStore;

/// Owns the lifecycle and query rules for [`GameRecord`]s.
///
/// Holds no record state of its own; every call reads from and writes to
/// the injected [`RecordStore`].
///
/// # Consistency
///
/// Each operation is at most one read followed by one write, with no
/// locking in between. Two concurrent `replace`/`update` calls on the same
/// id can interleave and lose one update, and two concurrent `create`
/// calls for the same id can both observe "absent" and both succeed, the
/// later `put` winning. Scans may mix pre- and post-write states across
/// keys. This is accepted: consistency is whatever the store gives per key.
#[derive(Clone)]
pub struct GameRecordService {
    store: Arc<dyn RecordStore>,
}

impl GameRecordService {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// `Conflict` if a record with the same id already exists (nothing is
    /// written), `StoreUnavailable` on backend failure.
    pub async fn create(&self, record: GameRecord) -> Result<GameRecord, GameError> {
        trace!(id = %record.id, "create");
        if self.store.get(&record.id).await?.is_some() {
            warn!(id = %record.id, "game already exists");
            return Err(GameError::Conflict { id: record.id });
        }
        self.store.put(&record).await?;
        Ok(record)
    }

    /// # Errors
    ///
    /// `NotFound` if no record has this id.
    pub async fn read(&self, id: &str) -> Result<GameRecord, GameError> {
        trace!(id, "read");
        self.store
            .get(id)
            .await?
            .ok_or_else(|| GameError::not_found(id))
    }

    /// Overwrites every attribute of the stored record with `new_data`'s,
    /// including attributes that are absent in `new_data`.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has `new_data.id` (nothing is written).
    pub async fn replace(&self, new_data: GameRecord) -> Result<GameRecord, GameError> {
        trace!(id = %new_data.id, "replace");
        let mut game = self.existing(&new_data.id).await?;
        replace_fields(&mut game, new_data);
        self.store.put(&game).await?;
        Ok(game)
    }

    /// Overwrites only the attributes that are present in `new_data`.
    ///
    /// A string attribute counts as present when it is set and non-empty; a
    /// score counts as present when it is set.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has `new_data.id` (nothing is written).
    pub async fn update(&self, new_data: GameRecord) -> Result<GameRecord, GameError> {
        trace!(id = %new_data.id, "update");
        let mut game = self.existing(&new_data.id).await?;
        merge_present_fields(&mut game, new_data);
        self.store.put(&game).await?;
        Ok(game)
    }

    /// # Errors
    ///
    /// `NotFound` if no record has this id (nothing is deleted).
    pub async fn delete(&self, id: &str) -> Result<(), GameError> {
        trace!(id, "delete");
        self.existing(id).await?;
        self.store.delete(id).await?;
        Ok(())
    }

    /// Every stored record, in no particular order.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` on backend failure.
    pub async fn list_all(&self) -> Result<Vec<GameRecord>, GameError> {
        trace!("list_all");
        Ok(self.store.scan(&GameFilter::All).await?)
    }

    /// Records where `team` is the home or away team.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` on backend failure.
    pub async fn list_by_team(&self, team: &str) -> Result<Vec<GameRecord>, GameError> {
        trace!(team, "list_by_team");
        Ok(self.store.scan(&GameFilter::team(team)).await?)
    }

    /// Records in which both teams play, in either slot. The order of the
    /// two names does not change the result set.
    ///
    /// # Errors
    ///
    /// `StoreUnavailable` on backend failure.
    pub async fn list_by_team_pair(
        &self,
        team1: &str,
        team2: &str,
    ) -> Result<Vec<GameRecord>, GameError> {
        trace!(team1, team2, "list_by_team_pair");
        Ok(self.store.scan(&GameFilter::team_pair(team1, team2)).await?)
    }

    /// Win/loss summary of `team1` against `team2` over every shared game.
    ///
    /// # Errors
    ///
    /// `NoHistory` if the teams share no games.
    pub async fn compute_head_to_head(
        &self,
        team1: &str,
        team2: &str,
    ) -> Result<HeadToHead, GameError> {
        let games = self.list_by_team_pair(team1, team2).await?;
        if games.is_empty() {
            return Err(GameError::NoHistory {
                team1: team1.to_string(),
                team2: team2.to_string(),
            });
        }
        let summary = HeadToHead::new(team1, team2, games);
        info!(
            undecided = summary.tally.undecided,
            "{}", summary.record
        );
        Ok(summary)
    }

    async fn existing(&self, id: &str) -> Result<GameRecord, GameError> {
        match self.store.get(id).await? {
            Some(game) => Ok(game),
            None => {
                warn!(id, "game not found");
                Err(GameError::not_found(id))
            }
        }
    }
}

/// Full replace: absent in `new_data` clears the stored value. `id` is kept.
fn replace_fields(game: &mut GameRecord, new_data: GameRecord) {
    game.year = new_data.year;
    game.week = new_data.week;
    game.home_team = new_data.home_team;
    game.away_team = new_data.away_team;
    game.home_team_pts = new_data.home_team_pts;
    game.away_team_pts = new_data.away_team_pts;
}

/// Partial merge: absent or empty in `new_data` leaves the stored value.
fn merge_present_fields(game: &mut GameRecord, new_data: GameRecord) {
    merge_text(&mut game.year, new_data.year);
    merge_text(&mut game.week, new_data.week);
    merge_text(&mut game.home_team, new_data.home_team);
    merge_text(&mut game.away_team, new_data.away_team);
    if new_data.home_team_pts.is_some() {
        game.home_team_pts = new_data.home_team_pts;
    }
    if new_data.away_team_pts.is_some() {
        game.away_team_pts = new_data.away_team_pts;
    }
}

fn merge_text(slot: &mut Option<String>, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = Some(value);
    }
}
