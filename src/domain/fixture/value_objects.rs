use serde::{Deserialize, Serialize};

/// Final result of a match from the home side's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl MatchOutcome {
    /// Classifies a final score
    pub fn from_score(home_goals: u32, away_goals: u32) -> Self {
        match home_goals.cmp(&away_goals) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    /// Result for the home side
    pub fn for_home(self) -> TeamResult {
        match self {
            MatchOutcome::HomeWin => TeamResult::Win,
            MatchOutcome::AwayWin => TeamResult::Loss,
            MatchOutcome::Draw => TeamResult::Draw,
        }
    }

    /// Result for the away side
    pub fn for_away(self) -> TeamResult {
        match self {
            MatchOutcome::HomeWin => TeamResult::Loss,
            MatchOutcome::AwayWin => TeamResult::Win,
            MatchOutcome::Draw => TeamResult::Draw,
        }
    }
}

/// Result of a match for one participating team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamResult {
    Win,
    Draw,
    Loss,
}

impl TeamResult {
    /// Classification points: 3 for a win, 1 for a draw, 0 for a loss
    pub fn points(self) -> u32 {
        match self {
            TeamResult::Win => 3,
            TeamResult::Draw => 1,
            TeamResult::Loss => 0,
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOutcome::HomeWin => write!(f, "home_win"),
            MatchOutcome::AwayWin => write!(f, "away_win"),
            MatchOutcome::Draw => write!(f, "draw"),
        }
    }
}
