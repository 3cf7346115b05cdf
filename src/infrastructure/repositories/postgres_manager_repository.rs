use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::storage_error;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::manager::Manager;
use crate::domain::repositories::ManagerRepository;

#[derive(sqlx::FromRow)]
struct ManagerRow {
    id: Uuid,
    league_id: Uuid,
    name: String,
    cumulative_score: Option<i64>,
}

impl From<ManagerRow> for Manager {
    fn from(r: ManagerRow) -> Self {
        Manager::from_persistence(r.id, r.league_id, r.name, r.cumulative_score)
    }
}

/// PostgreSQL implementation of ManagerRepository
pub struct PostgresManagerRepository {
    pool: PgPool,
}

impl PostgresManagerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ManagerRepository for PostgresManagerRepository {
    async fn save(&self, manager: &Manager) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO managers (id, league_id, name, cumulative_score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                cumulative_score = EXCLUDED.cumulative_score
            "#,
        )
        .bind(manager.id())
        .bind(manager.league_id())
        .bind(manager.name())
        .bind(manager.cumulative_score())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to save manager", e))?;

        Ok(())
    }

    async fn update_cumulative(&self, id: Uuid, total: i64) -> DomainResult<()> {
        sqlx::query("UPDATE managers SET cumulative_score = $2 WHERE id = $1")
            .bind(id)
            .bind(total)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to update manager cumulative score", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Manager>> {
        let row = sqlx::query_as::<_, ManagerRow>(
            "SELECT id, league_id, name, cumulative_score FROM managers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find manager by id", e))?;

        Ok(row.map(Manager::from))
    }

    async fn find_by_league(&self, league_id: Uuid) -> DomainResult<Vec<Manager>> {
        let rows = sqlx::query_as::<_, ManagerRow>(
            r#"
            SELECT id, league_id, name, cumulative_score
            FROM managers
            WHERE league_id = $1
            ORDER BY name
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to find managers by league", e))?;

        Ok(rows.into_iter().map(Manager::from).collect())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM managers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete manager", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Manager", id));
        }

        Ok(())
    }
}
