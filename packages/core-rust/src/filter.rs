//! Typed scan predicates over [`GameRecord`] attributes.
//!
//! A [`GameFilter`] is a small expression tree of field-equality terms joined
//! with AND/OR. Storage backends evaluate it with [`GameFilter::matches`]
//! during a full scan; backends with native filtering can walk the tree and
//! translate it instead.

use crate::types::GameRecord;

/// Record attribute that a [`GameFilter`] can test for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameField {
    HomeTeam,
    AwayTeam,
}

impl GameField {
    /// Reads this field from `game`. Absent fields yield `None`.
    #[must_use]
    pub fn get(self, game: &GameRecord) -> Option<&str> {
        match self {
            Self::HomeTeam => game.home_team.as_deref(),
            Self::AwayTeam => game.away_team.as_deref(),
        }
    }
}

/// Attribute-level predicate for [`GameRecord`] scans.
#[derive(Debug, Clone, PartialEq)]
pub enum GameFilter {
    /// Matches every record.
    All,
    /// Matches when `field` is present and exactly equal to `value`.
    Eq { field: GameField, value: String },
    /// Matches when every child matches. An empty `And` matches everything.
    And(Vec<GameFilter>),
    /// Matches when any child matches. An empty `Or` matches nothing.
    Or(Vec<GameFilter>),
}

impl GameFilter {
    /// Equality term on a single field.
    #[must_use]
    pub fn field_eq(field: GameField, value: impl Into<String>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    /// Games in which `team` plays, home or away.
    #[must_use]
    pub fn team(team: &str) -> Self {
        Self::Or(vec![
            Self::field_eq(GameField::HomeTeam, team),
            Self::field_eq(GameField::AwayTeam, team),
        ])
    }

    /// Games in which both teams play, in either slot.
    #[must_use]
    pub fn team_pair(team1: &str, team2: &str) -> Self {
        Self::And(vec![Self::team(team1), Self::team(team2)])
    }

    /// Evaluates the predicate against a record.
    #[must_use]
    pub fn matches(&self, game: &GameRecord) -> bool {
        match self {
            Self::All => true,
            Self::Eq { field, value } => field.get(game) == Some(value.as_str()),
            Self::And(terms) => terms.iter().all(|t| t.matches(game)),
            Self::Or(terms) => terms.iter().any(|t| t.matches(game)),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn game(home: Option<&str>, away: Option<&str>) -> GameRecord {
        GameRecord {
            id: "g".to_string(),
            home_team: home.map(str::to_string),
            away_team: away.map(str::to_string),
            ..GameRecord::default()
        }
    }

    #[test]
    fn all_matches_empty_record() {
        assert!(GameFilter::All.matches(&GameRecord::new("x")));
    }

    #[test]
    fn eq_never_matches_absent_field() {
        let filter = GameFilter::field_eq(GameField::HomeTeam, "");
        assert!(!filter.matches(&game(None, Some("a"))));
        assert!(filter.matches(&game(Some(""), None)));
    }

    #[test]
    fn team_matches_either_slot() {
        let filter = GameFilter::team("GimmyDaLoot");
        assert!(filter.matches(&game(Some("GimmyDaLoot"), Some("HogPit"))));
        assert!(filter.matches(&game(None, Some("GimmyDaLoot"))));
        assert!(!filter.matches(&game(Some("HogPit"), None)));
        assert!(!filter.matches(&game(Some("gimmydaloot"), None)));
    }

    #[test]
    fn team_pair_requires_both_teams() {
        let filter = GameFilter::team_pair("team1", "team2");
        assert!(filter.matches(&game(Some("team1"), Some("team2"))));
        assert!(filter.matches(&game(Some("team2"), Some("team1"))));
        assert!(!filter.matches(&game(Some("team1"), Some("team3"))));
        assert!(!filter.matches(&game(Some("team2"), None)));
    }

    #[test]
    fn empty_combinators() {
        let g = game(Some("a"), Some("b"));
        assert!(GameFilter::And(Vec::new()).matches(&g));
        assert!(!GameFilter::Or(Vec::new()).matches(&g));
    }

    fn team_name() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop::sample::select(vec!["a", "b", "c", ""]).prop_map(String::from))
    }

    proptest! {
        #[test]
        fn team_pair_is_order_independent(
            home in team_name(),
            away in team_name(),
            t1 in "[abc]",
            t2 in "[abc]",
        ) {
            let g = game(home.as_deref(), away.as_deref());
            prop_assert_eq!(
                GameFilter::team_pair(&t1, &t2).matches(&g),
                GameFilter::team_pair(&t2, &t1).matches(&g)
            );
        }

        #[test]
        fn team_filter_agrees_with_involves(
            home in team_name(),
            away in team_name(),
            t in "[abc]",
        ) {
            let g = game(home.as_deref(), away.as_deref());
            prop_assert_eq!(GameFilter::team(&t).matches(&g), g.involves(&t));
        }
    }
}
