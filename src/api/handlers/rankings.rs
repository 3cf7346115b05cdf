use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::scoring::{RankingEntry, StandingsRow};

/// One row of the sporting classification as served to clients
#[derive(Debug, Serialize)]
pub struct StandingsRowResponse {
    /// Absent for single-team lookups, which skip the full-table pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub team_id: Uuid,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingsRowResponse {
    fn new(position: Option<usize>, row: &StandingsRow) -> Self {
        Self {
            position,
            team_id: row.team_id,
            team_name: row.team_name.clone(),
            played: row.played(),
            wins: row.wins,
            draws: row.draws,
            losses: row.losses,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            goal_difference: row.goal_difference(),
            points: row.points(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub league_id: Uuid,
    pub manager_id: Uuid,
    pub position: usize,
}

/// Sporting classification of a league
///
/// GET /api/leagues/:id/standings
pub async fn league_standings(
    State(state): State<AppState>,
    Path(league_id): Path<Uuid>,
) -> Result<Json<Vec<StandingsRowResponse>>, ApiError> {
    let table = state.standings().classification(league_id).await?;

    Ok(Json(
        table
            .iter()
            .enumerate()
            .map(|(i, row)| StandingsRowResponse::new(Some(i + 1), row))
            .collect(),
    ))
}

/// A single team's classification row
///
/// GET /api/teams/:id/standing
pub async fn team_standing(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<StandingsRowResponse>, ApiError> {
    let row = state.standings().team_row(team_id).await?;
    Ok(Json(StandingsRowResponse::new(None, &row)))
}

/// Freshly computed manager leaderboard
///
/// GET /api/leagues/:id/leaderboard
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(league_id): Path<Uuid>,
) -> Result<Json<Vec<RankingEntry>>, ApiError> {
    let entries = state.rankings().leaderboard(league_id).await?;
    Ok(Json(entries))
}

/// A manager's 1-based position in the league leaderboard
///
/// GET /api/leagues/:league_id/managers/:manager_id/position
pub async fn manager_position(
    State(state): State<AppState>,
    Path((league_id, manager_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<PositionResponse>, ApiError> {
    let position = state.rankings().position_of(manager_id, league_id).await?;

    Ok(Json(PositionResponse {
        league_id,
        manager_id,
        position,
    }))
}
