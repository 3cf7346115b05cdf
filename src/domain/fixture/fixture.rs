use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::value_objects::{MatchOutcome, TeamResult};
use crate::domain::errors::{DomainError, DomainResult};

/// A finalized match between two teams in a round
///
/// There is no in-progress state: a match exists only with its final score.
///
/// # Invariants
/// - Home team and away team differ
/// - Goal counts are never negative
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    id: Uuid,
    round_id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    home_goals: u32,
    away_goals: u32,
    played_at: DateTime<Utc>,
}

impl Match {
    /// Creates a finalized match
    ///
    /// Goals arrive signed from the outer layers so that negative input is
    /// reported as `InvalidInput` instead of wrapping.
    pub fn new(
        round_id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
        home_goals: i32,
        away_goals: i32,
    ) -> DomainResult<Self> {
        if home_team_id == away_team_id {
            return Err(DomainError::invalid(
                "Home team and away team must be different",
            ));
        }
        let home_goals = u32::try_from(home_goals)
            .map_err(|_| DomainError::invalid("Home goals cannot be negative"))?;
        let away_goals = u32::try_from(away_goals)
            .map_err(|_| DomainError::invalid("Away goals cannot be negative"))?;

        Ok(Self {
            id: Uuid::new_v4(),
            round_id,
            home_team_id,
            away_team_id,
            home_goals,
            away_goals,
            played_at: Utc::now(),
        })
    }

    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_score(self.home_goals, self.away_goals)
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Goals for and against the given team, or `None` if it did not play
    pub fn goals_for_team(&self, team_id: Uuid) -> Option<(u32, u32)> {
        if team_id == self.home_team_id {
            Some((self.home_goals, self.away_goals))
        } else if team_id == self.away_team_id {
            Some((self.away_goals, self.home_goals))
        } else {
            None
        }
    }

    /// Result for the given team, or `None` if it did not play
    pub fn result_for_team(&self, team_id: Uuid) -> Option<TeamResult> {
        if team_id == self.home_team_id {
            Some(self.outcome().for_home())
        } else if team_id == self.away_team_id {
            Some(self.outcome().for_away())
        } else {
            None
        }
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn round_id(&self) -> Uuid {
        self.round_id
    }

    pub fn home_team_id(&self) -> Uuid {
        self.home_team_id
    }

    pub fn away_team_id(&self) -> Uuid {
        self.away_team_id
    }

    pub fn home_goals(&self) -> u32 {
        self.home_goals
    }

    pub fn away_goals(&self) -> u32 {
        self.away_goals
    }

    pub fn played_at(&self) -> DateTime<Utc> {
        self.played_at
    }

    /// Reconstructs a Match from persistence layer data
    ///
    /// Bypasses validation; the data was validated before it was stored.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: Uuid,
        round_id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
        home_goals: u32,
        away_goals: u32,
        played_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            round_id,
            home_team_id,
            away_team_id,
            home_goals,
            away_goals,
            played_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_match_with_valid_score() {
        let (round, home, away) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let m = Match::new(round, home, away, 2, 1).unwrap();

        assert_eq!(m.round_id(), round);
        assert_eq!(m.outcome(), MatchOutcome::HomeWin);
        assert_eq!(m.goals_for_team(home), Some((2, 1)));
        assert_eq!(m.goals_for_team(away), Some((1, 2)));
    }

    #[test]
    fn same_team_on_both_sides_fails() {
        let team = Uuid::new_v4();
        let result = Match::new(Uuid::new_v4(), team, team, 0, 0);

        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn negative_goals_fail() {
        let result = Match::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), -1, 0);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));

        let result = Match::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), 0, -3);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn uninvolved_team_has_no_result() {
        let m = Match::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), 0, 0).unwrap();
        let other = Uuid::new_v4();

        assert!(!m.involves(other));
        assert_eq!(m.goals_for_team(other), None);
        assert_eq!(m.result_for_team(other), None);
    }

    #[test]
    fn away_win_results() {
        let (home, away) = (Uuid::new_v4(), Uuid::new_v4());
        let m = Match::new(Uuid::new_v4(), home, away, 0, 2).unwrap();

        assert_eq!(m.result_for_team(home), Some(TeamResult::Loss));
        assert_eq!(m.result_for_team(away), Some(TeamResult::Win));
    }
}
