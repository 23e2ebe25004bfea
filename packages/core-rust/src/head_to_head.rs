//! Head-to-head summaries between two teams.
//!
//! A [`HeadToHead`] is derived on every query from the games both teams
//! played and is never persisted.

use std::fmt;

use serde::Serialize;

use crate::types::GameRecord;

/// Win counts between two teams over a set of games.
///
/// Only games with a strict winner are credited. Ties and games missing a
/// score go to `undecided` and count for neither side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinTally {
    pub team1_wins: usize,
    pub team2_wins: usize,
    pub undecided: usize,
}

impl WinTally {
    /// Tallies `games` from the point of view of `team1` against `team2`.
    ///
    /// A game won by a third team (possible only if the caller passes games
    /// the two teams did not share) is counted as undecided.
    #[must_use]
    pub fn tally(team1: &str, team2: &str, games: &[GameRecord]) -> Self {
        games.iter().fold(Self::default(), |mut tally, game| {
            match game.winner() {
                Some(winner) if winner == team1 => tally.team1_wins += 1,
                Some(winner) if winner == team2 => tally.team2_wins += 1,
                _ => tally.undecided += 1,
            }
            tally
        })
    }

    /// Number of games credited to either side.
    #[must_use]
    pub fn decided(&self) -> usize {
        self.team1_wins + self.team2_wins
    }
}

/// Win/loss summary and shared game list for two teams.
///
/// `team1` and `team2` keep the order they were queried in; `record` reads
/// `"<team1> : <team1 wins> - <team2> : <team2 wins>"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub team1: String,
    pub team2: String,
    pub record: String,
    pub games: Vec<GameRecord>,
    #[serde(skip)]
    pub tally: WinTally,
}

impl HeadToHead {
    #[must_use]
    pub fn new(team1: impl Into<String>, team2: impl Into<String>, games: Vec<GameRecord>) -> Self {
        let team1 = team1.into();
        let team2 = team2.into();
        let tally = WinTally::tally(&team1, &team2, &games);
        let record = format_record(&team1, &team2, &tally);
        Self {
            team1,
            team2,
            record,
            games,
            tally,
        }
    }
}

impl fmt::Display for HeadToHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.record)
    }
}

fn format_record(team1: &str, team2: &str, tally: &WinTally) -> String {
    format!(
        "{team1} : {} - {team2} : {}",
        tally.team1_wins, tally.team2_wins
    )
}
