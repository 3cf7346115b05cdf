use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::storage_error;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::repositories::RosterRepository;
use crate::domain::roster::Roster;

#[derive(sqlx::FromRow)]
struct RosterRow {
    id: Uuid,
    manager_id: Uuid,
    round_id: Uuid,
    player_ids: Vec<Uuid>,
    cached_total: Option<i32>,
    submitted_at: DateTime<Utc>,
}

impl From<RosterRow> for Roster {
    fn from(r: RosterRow) -> Self {
        Roster::from_persistence(
            r.id,
            r.manager_id,
            r.round_id,
            r.player_ids,
            r.cached_total,
            r.submitted_at,
        )
    }
}

const ROSTER_COLUMNS: &str = "id, manager_id, round_id, player_ids, cached_total, submitted_at";

/// PostgreSQL implementation of RosterRepository
///
/// Player ids are stored as a `UUID[]` value, so rosters never own or
/// cascade into ledger rows.
pub struct PostgresRosterRepository {
    pool: PgPool,
}

impl PostgresRosterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RosterRepository for PostgresRosterRepository {
    async fn save(&self, roster: &Roster) -> DomainResult<()> {
        let player_ids: Vec<Uuid> = roster.player_ids().iter().copied().collect();

        sqlx::query(
            r#"
            INSERT INTO rosters (id, manager_id, round_id, player_ids, cached_total, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                player_ids = EXCLUDED.player_ids,
                cached_total = EXCLUDED.cached_total
            "#,
        )
        .bind(roster.id())
        .bind(roster.manager_id())
        .bind(roster.round_id())
        .bind(player_ids)
        .bind(roster.cached_total())
        .bind(roster.submitted_at())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save roster", e))?;

        Ok(())
    }

    async fn update_cached_total(&self, id: Uuid, total: Option<i32>) -> DomainResult<()> {
        sqlx::query("UPDATE rosters SET cached_total = $2 WHERE id = $1")
            .bind(id)
            .bind(total)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to update roster total", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Roster>> {
        let sql = format!("SELECT {} FROM rosters WHERE id = $1", ROSTER_COLUMNS);
        let row = sqlx::query_as::<_, RosterRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find roster by id", e))?;

        Ok(row.map(Roster::from))
    }

    async fn find_by_manager_and_round(
        &self,
        manager_id: Uuid,
        round_id: Uuid,
    ) -> DomainResult<Option<Roster>> {
        let sql = format!(
            "SELECT {} FROM rosters WHERE manager_id = $1 AND round_id = $2",
            ROSTER_COLUMNS
        );
        let row = sqlx::query_as::<_, RosterRow>(&sql)
            .bind(manager_id)
            .bind(round_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find roster", e))?;

        Ok(row.map(Roster::from))
    }

    async fn find_by_manager(&self, manager_id: Uuid) -> DomainResult<Vec<Roster>> {
        let sql = format!(
            "SELECT {} FROM rosters WHERE manager_id = $1 ORDER BY submitted_at",
            ROSTER_COLUMNS
        );
        let rows = sqlx::query_as::<_, RosterRow>(&sql)
            .bind(manager_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find rosters by manager", e))?;

        Ok(rows.into_iter().map(Roster::from).collect())
    }

    async fn find_by_round(&self, round_id: Uuid) -> DomainResult<Vec<Roster>> {
        let sql = format!(
            "SELECT {} FROM rosters WHERE round_id = $1 ORDER BY submitted_at",
            ROSTER_COLUMNS
        );
        let rows = sqlx::query_as::<_, RosterRow>(&sql)
            .bind(round_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find rosters by round", e))?;

        Ok(rows.into_iter().map(Roster::from).collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM rosters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete roster", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Roster", id));
        }

        Ok(())
    }
}
