use serde::{Deserialize, Serialize};

/// A single game between two teams, keyed by a caller-supplied `id`.
///
/// Every attribute other than `id` is optional. `None` means "absent", which
/// is distinct from an empty string or a zero score: the service layer relies
/// on that distinction when merging partial updates.
///
/// Serializes with camelCase field names (`homeTeam`, `awayTeamPts`, ...) and
/// omits absent fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Opaque identifier, immutable once the record exists. Defaults to
    /// empty on input so update bodies may leave it out.
    #[serde(default)]
    pub id: String,
    /// Season year, e.g. `"2012"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Week within the season.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team_pts: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team_pts: Option<f64>,
}

impl GameRecord {
    /// Creates a record with the given id and every other field absent.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Returns a copy of this record carrying `id` instead of its own.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    #[must_use]
    pub fn with_week(mut self, week: impl Into<String>) -> Self {
        self.week = Some(week.into());
        self
    }

    #[must_use]
    pub fn with_home_team(mut self, team: impl Into<String>) -> Self {
        self.home_team = Some(team.into());
        self
    }

    #[must_use]
    pub fn with_away_team(mut self, team: impl Into<String>) -> Self {
        self.away_team = Some(team.into());
        self
    }

    /// Sets both scores at once, home first.
    #[must_use]
    pub fn with_score(mut self, home_pts: f64, away_pts: f64) -> Self {
        self.home_team_pts = Some(home_pts);
        self.away_team_pts = Some(away_pts);
        self
    }

    /// Returns `true` if `team` plays in this game, in either slot.
    ///
    /// Comparison is exact and case-sensitive.
    #[must_use]
    pub fn involves(&self, team: &str) -> bool {
        self.home_team.as_deref() == Some(team) || self.away_team.as_deref() == Some(team)
    }

    /// Name of the strictly higher-scoring team.
    ///
    /// Returns `None` for ties, for games missing either score, and for
    /// games whose winning slot has no team name.
    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        let (home, away) = (self.home_team_pts?, self.away_team_pts?);
        if home > away {
            self.home_team.as_deref()
        } else if away > home {
            self.away_team.as_deref()
        } else {
            None
        }
    }

    /// Encodes the record as `MsgPack` with field names.
    ///
    /// Named encoding is required because absent fields are skipped; the
    /// positional (array) form could not be decoded back.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_msgpack(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self)
    }

    /// Decodes a record previously produced by [`to_msgpack`](Self::to_msgpack).
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid encoded `GameRecord`.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(bytes)
    }
}
