use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{counter, storage_error};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::fixture::{Match, PerformanceRecord, PerformanceStats};
use crate::domain::repositories::{MatchRepository, PerformanceRepository};

#[derive(sqlx::FromRow)]
struct MatchRow {
    id: Uuid,
    round_id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    home_goals: i32,
    away_goals: i32,
    played_at: DateTime<Utc>,
}

impl TryFrom<MatchRow> for Match {
    type Error = DomainError;

    fn try_from(r: MatchRow) -> Result<Self, Self::Error> {
        Ok(Match::from_persistence(
            r.id,
            r.round_id,
            r.home_team_id,
            r.away_team_id,
            counter(r.home_goals, "matches.home_goals")?,
            counter(r.away_goals, "matches.away_goals")?,
            r.played_at,
        ))
    }
}

const MATCH_COLUMNS: &str =
    "m.id, m.round_id, m.home_team_id, m.away_team_id, m.home_goals, m.away_goals, m.played_at";

fn goals_column(value: u32) -> DomainResult<i32> {
    i32::try_from(value).map_err(|_| DomainError::invalid("Goal count out of range"))
}

/// PostgreSQL implementation of MatchRepository
pub struct PostgresMatchRepository {
    pool: PgPool,
}

impl PostgresMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PostgresMatchRepository {
    async fn save(&self, m: &Match) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO matches (
                id, round_id, home_team_id, away_team_id,
                home_goals, away_goals, played_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                home_goals = EXCLUDED.home_goals,
                away_goals = EXCLUDED.away_goals,
                played_at = EXCLUDED.played_at
            "#,
        )
        .bind(m.id())
        .bind(m.round_id())
        .bind(m.home_team_id())
        .bind(m.away_team_id())
        .bind(goals_column(m.home_goals())?)
        .bind(goals_column(m.away_goals())?)
        .bind(m.played_at())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save match", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Match>> {
        let sql = format!("SELECT {} FROM matches m WHERE m.id = $1", MATCH_COLUMNS);
        sqlx::query_as::<_, MatchRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find match by id", e))?
            .map(Match::try_from)
            .transpose()
    }

    async fn find_by_round(&self, round_id: Uuid) -> DomainResult<Vec<Match>> {
        let sql = format!(
            "SELECT {} FROM matches m WHERE m.round_id = $1 ORDER BY m.played_at",
            MATCH_COLUMNS
        );
        sqlx::query_as::<_, MatchRow>(&sql)
            .bind(round_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find matches by round", e))?
            .into_iter()
            .map(Match::try_from)
            .collect()
    }

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Match>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM matches m
            JOIN rounds r ON r.id = m.round_id
            WHERE r.league_id = $1
            ORDER BY r.number, m.played_at
            "#,
            MATCH_COLUMNS
        );
        sqlx::query_as::<_, MatchRow>(&sql)
            .bind(league_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find matches by league", e))?
            .into_iter()
            .map(Match::try_from)
            .collect()
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete match", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Match", id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct PerformanceRow {
    id: Uuid,
    player_id: Uuid,
    match_id: Uuid,
    goals: i32,
    assists: i32,
    yellow_cards: i32,
    red_card: bool,
    goals_conceded: i32,
    played_minimum: bool,
    points: i32,
}

impl TryFrom<PerformanceRow> for PerformanceRecord {
    type Error = DomainError;

    fn try_from(r: PerformanceRow) -> Result<Self, Self::Error> {
        Ok(PerformanceRecord {
            id: r.id,
            player_id: r.player_id,
            match_id: r.match_id,
            stats: PerformanceStats {
                goals: counter(r.goals, "performance_records.goals")?,
                assists: counter(r.assists, "performance_records.assists")?,
                yellow_cards: counter(r.yellow_cards, "performance_records.yellow_cards")?,
                red_card: r.red_card,
                goals_conceded: counter(r.goals_conceded, "performance_records.goals_conceded")?,
                played_minimum: r.played_minimum,
            },
            points: r.points,
        })
    }
}

const PERFORMANCE_COLUMNS: &str = "id, player_id, match_id, goals, assists, yellow_cards, \
     red_card, goals_conceded, played_minimum, points";

fn stat_column(value: u32) -> DomainResult<i32> {
    i32::try_from(value).map_err(|_| DomainError::invalid("Statistic out of range"))
}

/// PostgreSQL implementation of the performance ledger
///
/// `UNIQUE (player_id, match_id)` turns a second record for a pair into a
/// `Conflict`.
pub struct PostgresPerformanceRepository {
    pool: PgPool,
}

impl PostgresPerformanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PerformanceRepository for PostgresPerformanceRepository {
    async fn save(&self, record: &PerformanceRecord) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO performance_records (
                id, player_id, match_id, goals, assists, yellow_cards,
                red_card, goals_conceded, played_minimum, points
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                goals = EXCLUDED.goals,
                assists = EXCLUDED.assists,
                yellow_cards = EXCLUDED.yellow_cards,
                red_card = EXCLUDED.red_card,
                goals_conceded = EXCLUDED.goals_conceded,
                played_minimum = EXCLUDED.played_minimum,
                points = EXCLUDED.points
            "#,
        )
        .bind(record.id)
        .bind(record.player_id)
        .bind(record.match_id)
        .bind(stat_column(record.stats.goals)?)
        .bind(stat_column(record.stats.assists)?)
        .bind(stat_column(record.stats.yellow_cards)?)
        .bind(record.stats.red_card)
        .bind(stat_column(record.stats.goals_conceded)?)
        .bind(record.stats.played_minimum)
        .bind(record.points)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save performance record", e))?;

        Ok(())
    }

    async fn find_by_player_and_match(
        &self,
        player_id: Uuid,
        match_id: Uuid,
    ) -> DomainResult<Option<PerformanceRecord>> {
        let sql = format!(
            "SELECT {} FROM performance_records WHERE player_id = $1 AND match_id = $2",
            PERFORMANCE_COLUMNS
        );
        sqlx::query_as::<_, PerformanceRow>(&sql)
            .bind(player_id)
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find performance record", e))?
            .map(PerformanceRecord::try_from)
            .transpose()
    }

    async fn find_by_player(&self, player_id: Uuid) -> DomainResult<Vec<PerformanceRecord>> {
        let sql = format!(
            "SELECT {} FROM performance_records WHERE player_id = $1",
            PERFORMANCE_COLUMNS
        );
        sqlx::query_as::<_, PerformanceRow>(&sql)
            .bind(player_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find performance records by player", e))?
            .into_iter()
            .map(PerformanceRecord::try_from)
            .collect()
    }

    async fn find_by_match(&self, match_id: Uuid) -> DomainResult<Vec<PerformanceRecord>> {
        let sql = format!(
            "SELECT {} FROM performance_records WHERE match_id = $1",
            PERFORMANCE_COLUMNS
        );
        sqlx::query_as::<_, PerformanceRow>(&sql)
            .bind(match_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find performance records by match", e))?
            .into_iter()
            .map(PerformanceRecord::try_from)
            .collect()
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM performance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete performance record", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("PerformanceRecord", id));
        }

        Ok(())
    }
}
