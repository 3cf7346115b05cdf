use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::fixture::{Match, TeamResult};
use crate::domain::repositories::{LeagueRepository, MatchRepository, Repositories, TeamRepository};
use crate::domain::team::Team;

/// One team's line in the sporting classification
///
/// Derived on every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl StandingsRow {
    /// A zeroed row for a team that has not played yet
    pub fn new(team: &Team) -> Self {
        Self {
            team_id: team.id(),
            team_name: team.name().to_string(),
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// 3 per win, 1 per draw
    pub fn points(&self) -> u32 {
        TeamResult::Win.points() * self.wins + TeamResult::Draw.points() * self.draws
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Folds one match into the row; matches the team did not play are ignored
    fn apply(&mut self, m: &Match) {
        let (Some((scored, conceded)), Some(result)) = (
            m.goals_for_team(self.team_id),
            m.result_for_team(self.team_id),
        ) else {
            return;
        };

        self.goals_for += scored;
        self.goals_against += conceded;
        match result {
            TeamResult::Win => self.wins += 1,
            TeamResult::Draw => self.draws += 1,
            TeamResult::Loss => self.losses += 1,
        }
    }

    /// (points, goal difference, goals for): the classification key
    pub fn sort_key(&self) -> (u32, i64, u32) {
        (self.points(), self.goal_difference(), self.goals_for)
    }
}

/// Table order: classification key descending, then team name and id
/// ascending so that exact ties still come out in a reproducible order
fn compare_rows(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.sort_key()
        .cmp(&a.sort_key())
        .then_with(|| a.team_name.cmp(&b.team_name))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Builds the sorted classification of `teams` from `matches`
///
/// Each match is counted once even if it appears more than once in the
/// input. Teams without matches get all-zero rows. A side of a match whose
/// team is not in `teams` is ignored.
pub fn build_table(teams: &[Team], matches: &[Match]) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::with_capacity(teams.len());
    let mut index: HashMap<Uuid, usize> = HashMap::with_capacity(teams.len());
    for team in teams {
        index.entry(team.id()).or_insert_with(|| {
            rows.push(StandingsRow::new(team));
            rows.len() - 1
        });
    }

    let mut seen = HashSet::with_capacity(matches.len());
    for m in matches.iter().filter(|m| seen.insert(m.id())) {
        for team_id in [m.home_team_id(), m.away_team_id()] {
            if let Some(&i) = index.get(&team_id) {
                rows[i].apply(m);
            }
        }
    }

    rows.sort_by(compare_rows);
    rows
}

/// Builds a single team's row directly from its own matches
///
/// Agrees with the row `build_table` would produce for the same team.
pub fn build_row(team: &Team, matches: &[Match]) -> StandingsRow {
    let mut row = StandingsRow::new(team);
    let mut seen = HashSet::new();
    for m in matches
        .iter()
        .filter(|m| m.involves(team.id()) && seen.insert(m.id()))
    {
        row.apply(m);
    }
    row
}

/// Repository-backed access to league classifications
#[derive(Clone)]
pub struct StandingsService {
    leagues: Arc<dyn LeagueRepository>,
    teams: Arc<dyn TeamRepository>,
    matches: Arc<dyn MatchRepository>,
}

impl StandingsService {
    pub fn new(
        leagues: Arc<dyn LeagueRepository>,
        teams: Arc<dyn TeamRepository>,
        matches: Arc<dyn MatchRepository>,
    ) -> Self {
        Self {
            leagues,
            teams,
            matches,
        }
    }

    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(
            repos.leagues.clone(),
            repos.teams.clone(),
            repos.matches.clone(),
        )
    }

    /// Sorted classification of a league
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - If the league does not exist
    /// * `Ok(vec![])` - For an existing league with no teams
    pub async fn classification(&self, league_id: Uuid) -> DomainResult<Vec<StandingsRow>> {
        if self.leagues.find_by_id(league_id).await?.is_none() {
            return Err(DomainError::not_found("League", league_id));
        }

        let teams = self.teams.find_by_league(league_id).await?;
        let matches = self.matches.find_by_league(league_id).await?;
        let table = build_table(&teams, &matches);

        tracing::debug!(%league_id, teams = table.len(), matches = matches.len(), "Classification built");
        Ok(table)
    }

    /// A single team's row, computed from that team's matches only
    pub async fn team_row(&self, team_id: Uuid) -> DomainResult<StandingsRow> {
        let team = self
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team", team_id))?;

        let matches = self.matches.find_by_league(team.league_id()).await?;
        Ok(build_row(&team, &matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(league: Uuid, name: &str) -> Team {
        Team::new(league, name, None).unwrap()
    }

    fn played(round: Uuid, home: &Team, away: &Team, hg: i32, ag: i32) -> Match {
        Match::new(round, home.id(), away.id(), hg, ag).unwrap()
    }

    #[test]
    fn single_home_win() {
        let (league, round) = (Uuid::new_v4(), Uuid::new_v4());
        let home = team(league, "Home");
        let away = team(league, "Away");
        let matches = vec![played(round, &home, &away, 2, 1)];

        let table = build_table(&[away.clone(), home.clone()], &matches);

        assert_eq!(table[0].team_id, home.id());
        assert_eq!((table[0].wins, table[0].draws, table[0].losses), (1, 0, 0));
        assert_eq!((table[0].goals_for, table[0].goals_against), (2, 1));
        assert_eq!(table[0].points(), 3);
        assert_eq!(table[1].team_id, away.id());
        assert_eq!((table[1].wins, table[1].draws, table[1].losses), (0, 0, 1));
        assert_eq!((table[1].goals_for, table[1].goals_against), (1, 2));
        assert_eq!(table[1].points(), 0);
    }

    #[test]
    fn two_draws_give_two_points_each() {
        let (league, round) = (Uuid::new_v4(), Uuid::new_v4());
        let a = team(league, "A");
        let b = team(league, "B");
        let matches = vec![played(round, &a, &b, 1, 1), played(round, &b, &a, 1, 1)];

        let table = build_table(&[a, b], &matches);

        for row in &table {
            assert_eq!((row.wins, row.draws, row.losses), (0, 2, 0));
            assert_eq!((row.goals_for, row.goals_against), (2, 2));
            assert_eq!(row.points(), 2);
        }
    }

    #[test]
    fn duplicated_match_is_counted_once() {
        let (league, round) = (Uuid::new_v4(), Uuid::new_v4());
        let a = team(league, "A");
        let b = team(league, "B");
        let m = played(round, &a, &b, 3, 0);

        let table = build_table(&[a.clone(), b], &[m.clone(), m.clone()]);

        let row_a = table.iter().find(|r| r.team_id == a.id()).unwrap();
        assert_eq!(row_a.wins, 1);
        assert_eq!(row_a.goals_for, 3);
        assert_eq!(build_row(&a, &[m.clone(), m]).wins, 1);
    }

    #[test]
    fn tie_breaks_on_goal_difference_then_goals_for() {
        let (league, round) = (Uuid::new_v4(), Uuid::new_v4());
        let a = team(league, "A");
        let b = team(league, "B");
        let c = team(league, "C");
        let d = team(league, "D");
        // A and C both win once; A by a wider margin
        // B and D both lose once by one goal; D scored more
        let matches = vec![
            played(round, &a, &b, 3, 0),
            played(round, &c, &d, 3, 2),
        ];

        let table = build_table(&[d.clone(), c.clone(), b.clone(), a.clone()], &matches);
        let order: Vec<Uuid> = table.iter().map(|r| r.team_id).collect();

        assert_eq!(order, vec![a.id(), c.id(), d.id(), b.id()]);
    }

    #[test]
    fn goals_for_breaks_equal_difference() {
        let (league, round) = (Uuid::new_v4(), Uuid::new_v4());
        let a = team(league, "A");
        let b = team(league, "B");
        let c = team(league, "C");
        let d = team(league, "D");
        let matches = vec![
            played(round, &a, &b, 1, 1),
            played(round, &c, &d, 3, 3),
        ];

        let table = build_table(&[a.clone(), b.clone(), c.clone(), d.clone()], &matches);

        assert!(table[0].team_id == c.id() || table[0].team_id == d.id());
        assert!(table[2].team_id == a.id() || table[2].team_id == b.id());
    }

    #[test]
    fn exact_ties_fall_back_to_name() {
        let league = Uuid::new_v4();
        let zulu = team(league, "Zulu");
        let alpha = team(league, "Alpha");

        let table = build_table(&[zulu.clone(), alpha.clone()], &[]);

        assert_eq!(table[0].team_id, alpha.id());
        assert_eq!(table[1].team_id, zulu.id());
    }

    #[test]
    fn teams_without_matches_get_zero_rows() {
        let (league, round) = (Uuid::new_v4(), Uuid::new_v4());
        let a = team(league, "A");
        let b = team(league, "B");
        let idle = team(league, "Idle");
        let matches = vec![played(round, &a, &b, 0, 1)];

        let table = build_table(&[a, b, idle.clone()], &matches);

        assert_eq!(table.len(), 3);
        let idle_row = table.iter().find(|r| r.team_id == idle.id()).unwrap();
        assert_eq!(idle_row.played(), 0);
        assert_eq!(idle_row.points(), 0);
    }

    #[test]
    fn no_teams_gives_empty_table() {
        assert!(build_table(&[], &[]).is_empty());
    }

    #[test]
    fn duplicate_team_entries_produce_one_row() {
        let a = team(Uuid::new_v4(), "A");
        let table = build_table(&[a.clone(), a], &[]);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn build_row_matches_table_row() {
        let (league, round) = (Uuid::new_v4(), Uuid::new_v4());
        let a = team(league, "A");
        let b = team(league, "B");
        let c = team(league, "C");
        let matches = vec![
            played(round, &a, &b, 2, 2),
            played(round, &c, &a, 0, 4),
            played(round, &b, &c, 1, 0),
        ];

        let table = build_table(&[a.clone(), b.clone(), c.clone()], &matches);

        for t in [&a, &b, &c] {
            let from_table = table.iter().find(|r| r.team_id == t.id()).unwrap();
            assert_eq!(&build_row(t, &matches), from_table);
        }
    }

    #[test]
    fn goal_difference_can_be_negative() {
        let (league, round) = (Uuid::new_v4(), Uuid::new_v4());
        let a = team(league, "A");
        let b = team(league, "B");

        let row = build_row(&b, &[played(round, &a, &b, 5, 1)]);

        assert_eq!(row.goal_difference(), -4);
        assert_eq!(row.sort_key(), (0, -4, 1));
    }
}
