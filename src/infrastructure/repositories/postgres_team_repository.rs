use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::storage_error;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::{PlayerRepository, TeamRepository};
use crate::domain::team::{Player, Team};

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    league_id: Uuid,
    name: String,
    badge: Option<String>,
}

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        Team::from_persistence(r.id, r.league_id, r.name, r.badge)
    }
}

/// PostgreSQL implementation of TeamRepository
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn save(&self, team: &Team) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, league_id, name, badge)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                badge = EXCLUDED.badge
            "#,
        )
        .bind(team.id())
        .bind(team.league_id())
        .bind(team.name())
        .bind(team.badge())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save team", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT id, league_id, name, badge FROM teams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find team by id", e))?;

        Ok(row.map(Team::from))
    }

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, league_id, name, badge
            FROM teams
            WHERE league_id = $1
            ORDER BY name
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find teams by league", e))?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete team", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Team", id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct PlayerRow {
    id: Uuid,
    team_id: Uuid,
    name: String,
    price: Decimal,
    is_goalkeeper: bool,
}

impl From<PlayerRow> for Player {
    fn from(r: PlayerRow) -> Self {
        Player {
            id: r.id,
            team_id: r.team_id,
            name: r.name,
            price: r.price,
            is_goalkeeper: r.is_goalkeeper,
        }
    }
}

/// PostgreSQL implementation of PlayerRepository
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    async fn save(&self, player: &Player) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO players (id, team_id, name, price, is_goalkeeper)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                price = EXCLUDED.price,
                is_goalkeeper = EXCLUDED.is_goalkeeper
            "#,
        )
        .bind(player.id)
        .bind(player.team_id)
        .bind(&player.name)
        .bind(player.price)
        .bind(player.is_goalkeeper)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save player", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Player>> {
        let row = sqlx::query_as::<_, PlayerRow>(
            "SELECT id, team_id, name, price, is_goalkeeper FROM players WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find player by id", e))?;

        Ok(row.map(Player::from))
    }

    async fn find_by_team(&self, team_id: Uuid) -> DomainResult<Vec<Player>> {
        let rows = sqlx::query_as::<_, PlayerRow>(
            r#"
            SELECT id, team_id, name, price, is_goalkeeper
            FROM players
            WHERE team_id = $1
            ORDER BY name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find players by team", e))?;

        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete player", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Player", id));
        }

        Ok(())
    }
}
