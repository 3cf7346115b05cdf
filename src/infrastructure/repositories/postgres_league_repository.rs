use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{counter, storage_error};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::league::{League, Round};
use crate::domain::repositories::{LeagueRepository, RoundRepository};

#[derive(sqlx::FromRow)]
struct LeagueRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

/// PostgreSQL implementation of LeagueRepository
///
/// Deleting a league relies on `ON DELETE CASCADE` for everything it owns.
pub struct PostgresLeagueRepository {
    pool: PgPool,
}

impl PostgresLeagueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeagueRepository for PostgresLeagueRepository {
    async fn save(&self, league: &League) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO leagues (id, name, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(league.id)
        .bind(&league.name)
        .bind(league.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save league", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<League>> {
        let row = sqlx::query_as::<_, LeagueRow>(
            "SELECT id, name, created_at FROM leagues WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find league by id", e))?;

        Ok(row.map(|r| League {
            id: r.id,
            name: r.name,
            created_at: r.created_at,
        }))
    }

    async fn find_all(&self) -> DomainResult<Vec<League>> {
        let rows = sqlx::query_as::<_, LeagueRow>(
            "SELECT id, name, created_at FROM leagues ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list leagues", e))?;

        Ok(rows
            .into_iter()
            .map(|r| League {
                id: r.id,
                name: r.name,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM leagues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete league", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("League", id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct RoundRow {
    id: Uuid,
    league_id: Uuid,
    number: i32,
}

impl TryFrom<RoundRow> for Round {
    type Error = DomainError;

    fn try_from(r: RoundRow) -> Result<Self, Self::Error> {
        Ok(Round {
            id: r.id,
            league_id: r.league_id,
            number: counter(r.number, "rounds.number")?,
        })
    }
}

/// PostgreSQL implementation of RoundRepository
pub struct PostgresRoundRepository {
    pool: PgPool,
}

impl PostgresRoundRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoundRepository for PostgresRoundRepository {
    async fn save(&self, round: &Round) -> DomainResult<()> {
        let number = i32::try_from(round.number)
            .map_err(|_| DomainError::invalid("Round number out of range"))?;

        sqlx::query(
            r#"
            INSERT INTO rounds (id, league_id, number)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET number = EXCLUDED.number
            "#,
        )
        .bind(round.id)
        .bind(round.league_id)
        .bind(number)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save round", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Round>> {
        sqlx::query_as::<_, RoundRow>("SELECT id, league_id, number FROM rounds WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find round by id", e))?
            .map(Round::try_from)
            .transpose()
    }

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Round>> {
        sqlx::query_as::<_, RoundRow>(
            "SELECT id, league_id, number FROM rounds WHERE league_id = $1 ORDER BY number",
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find rounds by league", e))?
        .into_iter()
        .map(Round::try_from)
        .collect()
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM rounds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete round", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Round", id));
        }

        Ok(())
    }
}
