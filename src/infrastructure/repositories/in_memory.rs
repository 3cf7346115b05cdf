use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::fixture::{Match, PerformanceRecord};
use crate::domain::league::{League, Round};
use crate::domain::manager::Manager;
use crate::domain::repositories::{
    LeagueRepository, ManagerRepository, MatchRepository, PerformanceRepository,
    PlayerRepository, Repositories, RosterRepository, RoundRepository, TeamRepository,
};
use crate::domain::roster::Roster;
use crate::domain::team::{Player, Team};

#[derive(Default)]
struct Tables {
    leagues: HashMap<Uuid, League>,
    rounds: HashMap<Uuid, Round>,
    teams: HashMap<Uuid, Team>,
    players: HashMap<Uuid, Player>,
    matches: HashMap<Uuid, Match>,
    performances: HashMap<Uuid, PerformanceRecord>,
    rosters: HashMap<Uuid, Roster>,
    managers: HashMap<Uuid, Manager>,
}

impl Tables {
    fn remove_match(&mut self, match_id: Uuid) {
        self.matches.remove(&match_id);
        self.performances.retain(|_, r| r.match_id != match_id);
    }

    fn remove_player(&mut self, player_id: Uuid) {
        self.players.remove(&player_id);
        self.performances.retain(|_, r| r.player_id != player_id);
    }

    fn remove_round(&mut self, round_id: Uuid) {
        self.rounds.remove(&round_id);
        let match_ids: Vec<Uuid> = self
            .matches
            .values()
            .filter(|m| m.round_id() == round_id)
            .map(|m| m.id())
            .collect();
        for id in match_ids {
            self.remove_match(id);
        }
        self.rosters.retain(|_, r| r.round_id() != round_id);
    }

    fn remove_team(&mut self, team_id: Uuid) {
        self.teams.remove(&team_id);
        let player_ids: Vec<Uuid> = self
            .players
            .values()
            .filter(|p| p.team_id == team_id)
            .map(|p| p.id)
            .collect();
        for id in player_ids {
            self.remove_player(id);
        }
        let match_ids: Vec<Uuid> = self
            .matches
            .values()
            .filter(|m| m.involves(team_id))
            .map(|m| m.id())
            .collect();
        for id in match_ids {
            self.remove_match(id);
        }
    }

    fn remove_manager(&mut self, manager_id: Uuid) {
        self.managers.remove(&manager_id);
        self.rosters.retain(|_, r| r.manager_id() != manager_id);
    }

    fn remove_league(&mut self, league_id: Uuid) {
        self.leagues.remove(&league_id);

        let team_ids: Vec<Uuid> = self
            .teams
            .values()
            .filter(|t| t.league_id() == league_id)
            .map(|t| t.id())
            .collect();
        for id in team_ids {
            self.remove_team(id);
        }

        let round_ids: Vec<Uuid> = self
            .rounds
            .values()
            .filter(|r| r.league_id == league_id)
            .map(|r| r.id)
            .collect();
        for id in round_ids {
            self.remove_round(id);
        }

        let manager_ids: Vec<Uuid> = self
            .managers
            .values()
            .filter(|m| m.league_id() == league_id)
            .map(|m| m.id())
            .collect();
        for id in manager_ids {
            self.remove_manager(id);
        }
    }
}

/// In-process storage backend implementing every repository port
///
/// Mirrors the PostgreSQL schema's uniqueness and cascade rules so that the
/// engine behaves the same against either backend.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository bundle backed by this store
    pub fn repositories(&self) -> Repositories {
        Repositories {
            leagues: Arc::new(self.clone()),
            rounds: Arc::new(self.clone()),
            teams: Arc::new(self.clone()),
            players: Arc::new(self.clone()),
            matches: Arc::new(self.clone()),
            performances: Arc::new(self.clone()),
            rosters: Arc::new(self.clone()),
            managers: Arc::new(self.clone()),
        }
    }
}

fn missing(entity: &'static str, id: Uuid) -> DomainError {
    DomainError::not_found(entity, id)
}

#[async_trait]
impl LeagueRepository for InMemoryStore {
    async fn save(&self, league: &League) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        tables.leagues.insert(league.id, league.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<League>> {
        Ok(self.tables.read().await.leagues.get(&id).cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<League>> {
        let mut leagues: Vec<League> = self.tables.read().await.leagues.values().cloned().collect();
        leagues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leagues)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.leagues.contains_key(&id) {
            return Err(missing("League", id));
        }
        tables.remove_league(id);
        Ok(())
    }
}

#[async_trait]
impl RoundRepository for InMemoryStore {
    async fn save(&self, round: &Round) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        let taken = tables.rounds.values().any(|r| {
            r.league_id == round.league_id && r.number == round.number && r.id != round.id
        });
        if taken {
            return Err(DomainError::conflict(format!(
                "Round {} already exists in league {}",
                round.number, round.league_id
            )));
        }
        tables.rounds.insert(round.id, round.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Round>> {
        Ok(self.tables.read().await.rounds.get(&id).cloned())
    }

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Round>> {
        let mut rounds: Vec<Round> = self
            .tables
            .read()
            .await
            .rounds
            .values()
            .filter(|r| r.league_id == league_id)
            .cloned()
            .collect();
        rounds.sort_by_key(|r| r.number);
        Ok(rounds)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.rounds.contains_key(&id) {
            return Err(missing("Round", id));
        }
        tables.remove_round(id);
        Ok(())
    }
}

#[async_trait]
impl TeamRepository for InMemoryStore {
    async fn save(&self, team: &Team) -> DomainResult<()> {
        self.tables.write().await.teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Team>> {
        Ok(self.tables.read().await.teams.get(&id).cloned())
    }

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Team>> {
        let mut teams: Vec<Team> = self
            .tables
            .read()
            .await
            .teams
            .values()
            .filter(|t| t.league_id() == league_id)
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(teams)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.teams.contains_key(&id) {
            return Err(missing("Team", id));
        }
        tables.remove_team(id);
        Ok(())
    }
}

#[async_trait]
impl PlayerRepository for InMemoryStore {
    async fn save(&self, player: &Player) -> DomainResult<()> {
        self.tables.write().await.players.insert(player.id, player.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Player>> {
        Ok(self.tables.read().await.players.get(&id).cloned())
    }

    async fn find_by_team(&self, team_id: Uuid) -> DomainResult<Vec<Player>> {
        let mut players: Vec<Player> = self
            .tables
            .read()
            .await
            .players
            .values()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(players)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.players.contains_key(&id) {
            return Err(missing("Player", id));
        }
        tables.remove_player(id);
        Ok(())
    }
}

#[async_trait]
impl MatchRepository for InMemoryStore {
    async fn save(&self, m: &Match) -> DomainResult<()> {
        self.tables.write().await.matches.insert(m.id(), m.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Match>> {
        Ok(self.tables.read().await.matches.get(&id).cloned())
    }

    async fn find_by_round(&self, round_id: Uuid) -> DomainResult<Vec<Match>> {
        let mut matches: Vec<Match> = self
            .tables
            .read()
            .await
            .matches
            .values()
            .filter(|m| m.round_id() == round_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.played_at());
        Ok(matches)
    }

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Match>> {
        let tables = self.tables.read().await;
        let mut matches: Vec<Match> = tables
            .matches
            .values()
            .filter(|m| {
                tables
                    .rounds
                    .get(&m.round_id())
                    .is_some_and(|r| r.league_id == league_id)
            })
            .cloned()
            .collect();
        matches.sort_by_key(|m| m.played_at());
        Ok(matches)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.matches.contains_key(&id) {
            return Err(missing("Match", id));
        }
        tables.remove_match(id);
        Ok(())
    }
}

#[async_trait]
impl PerformanceRepository for InMemoryStore {
    async fn save(&self, record: &PerformanceRecord) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        let taken = tables.performances.values().any(|r| {
            r.player_id == record.player_id && r.match_id == record.match_id && r.id != record.id
        });
        if taken {
            return Err(DomainError::conflict(format!(
                "Performance already recorded for player {} in match {}",
                record.player_id, record.match_id
            )));
        }
        tables.performances.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_by_player_and_match(
        &self,
        player_id: Uuid,
        match_id: Uuid,
    ) -> DomainResult<Option<PerformanceRecord>> {
        Ok(self
            .tables
            .read()
            .await
            .performances
            .values()
            .find(|r| r.player_id == player_id && r.match_id == match_id)
            .cloned())
    }

    async fn find_by_player(&self, player_id: Uuid) -> DomainResult<Vec<PerformanceRecord>> {
        Ok(self
            .tables
            .read()
            .await
            .performances
            .values()
            .filter(|r| r.player_id == player_id)
            .cloned()
            .collect())
    }

    async fn find_by_match(&self, match_id: Uuid) -> DomainResult<Vec<PerformanceRecord>> {
        Ok(self
            .tables
            .read()
            .await
            .performances
            .values()
            .filter(|r| r.match_id == match_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        match self.tables.write().await.performances.remove(&id) {
            Some(_) => Ok(()),
            None => Err(missing("PerformanceRecord", id)),
        }
    }
}

#[async_trait]
impl RosterRepository for InMemoryStore {
    async fn save(&self, roster: &Roster) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        let taken = tables.rosters.values().any(|r| {
            r.manager_id() == roster.manager_id()
                && r.round_id() == roster.round_id()
                && r.id() != roster.id()
        });
        if taken {
            return Err(DomainError::conflict(format!(
                "Manager {} already has a roster for round {}",
                roster.manager_id(),
                roster.round_id()
            )));
        }
        tables.rosters.insert(roster.id(), roster.clone());
        Ok(())
    }

    async fn update_cached_total(&self, id: Uuid, total: Option<i32>) -> DomainResult<()> {
        if let Some(roster) = self.tables.write().await.rosters.get_mut(&id) {
            match total {
                Some(total) => {
                    roster.record_score(total);
                }
                None => roster.invalidate_score(),
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Roster>> {
        Ok(self.tables.read().await.rosters.get(&id).cloned())
    }

    async fn find_by_manager_and_round(
        &self,
        manager_id: Uuid,
        round_id: Uuid,
    ) -> DomainResult<Option<Roster>> {
        Ok(self
            .tables
            .read()
            .await
            .rosters
            .values()
            .find(|r| r.manager_id() == manager_id && r.round_id() == round_id)
            .cloned())
    }

    async fn find_by_manager(&self, manager_id: Uuid) -> DomainResult<Vec<Roster>> {
        Ok(self
            .tables
            .read()
            .await
            .rosters
            .values()
            .filter(|r| r.manager_id() == manager_id)
            .cloned()
            .collect())
    }

    async fn find_by_round(&self, round_id: Uuid) -> DomainResult<Vec<Roster>> {
        let mut rosters: Vec<Roster> = self
            .tables
            .read()
            .await
            .rosters
            .values()
            .filter(|r| r.round_id() == round_id)
            .cloned()
            .collect();
        rosters.sort_by_key(|r| r.submitted_at());
        Ok(rosters)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        match self.tables.write().await.rosters.remove(&id) {
            Some(_) => Ok(()),
            None => Err(missing("Roster", id)),
        }
    }
}

#[async_trait]
impl ManagerRepository for InMemoryStore {
    async fn save(&self, manager: &Manager) -> DomainResult<()> {
        self.tables
            .write()
            .await
            .managers
            .insert(manager.id(), manager.clone());
        Ok(())
    }

    async fn update_cumulative(&self, id: Uuid, total: i64) -> DomainResult<()> {
        if let Some(manager) = self.tables.write().await.managers.get_mut(&id) {
            manager.record_cumulative(total);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Manager>> {
        Ok(self.tables.read().await.managers.get(&id).cloned())
    }

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Manager>> {
        let mut managers: Vec<Manager> = self
            .tables
            .read()
            .await
            .managers
            .values()
            .filter(|m| m.league_id() == league_id)
            .cloned()
            .collect();
        managers.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(managers)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.managers.contains_key(&id) {
            return Err(missing("Manager", id));
        }
        tables.remove_manager(id);
        Ok(())
    }
}
