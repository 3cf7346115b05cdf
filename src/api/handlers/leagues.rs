use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::errors::DomainError;
use crate::domain::league::{League, Round};
use crate::domain::manager::Manager;
use crate::domain::team::{Player, Team};

/// Request body for creating a league
#[derive(Debug, Deserialize)]
pub struct CreateLeagueRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LeagueResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&League> for LeagueResponse {
    fn from(league: &League) -> Self {
        Self {
            id: league.id,
            name: league.name.clone(),
            created_at: league.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub badge: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub badge: Option<String>,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id(),
            league_id: team.league_id(),
            name: team.name().to_string(),
            badge: team.badge().map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub is_goalkeeper: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoundRequest {
    pub number: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateManagerRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ManagerResponse {
    pub id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub cumulative_score: Option<i64>,
}

impl From<&Manager> for ManagerResponse {
    fn from(manager: &Manager) -> Self {
        Self {
            id: manager.id(),
            league_id: manager.league_id(),
            name: manager.name().to_string(),
            cumulative_score: manager.cumulative_score(),
        }
    }
}

async fn require_league(state: &AppState, id: Uuid) -> Result<League, ApiError> {
    state
        .repos
        .leagues
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("League", id).into())
}

/// Create a new league
///
/// POST /api/leagues
pub async fn create_league(
    State(state): State<AppState>,
    Json(req): Json<CreateLeagueRequest>,
) -> Result<(StatusCode, Json<LeagueResponse>), ApiError> {
    let league = League::new(req.name)?;
    state.repos.leagues.save(&league).await?;

    tracing::info!(league_id = %league.id, "League created");
    Ok((StatusCode::CREATED, Json(LeagueResponse::from(&league))))
}

/// Get a league by ID
///
/// GET /api/leagues/:id
pub async fn get_league(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LeagueResponse>, ApiError> {
    let league = require_league(&state, id).await?;
    Ok(Json(LeagueResponse::from(&league)))
}

/// Delete a league and everything it owns
///
/// DELETE /api/leagues/:id
pub async fn delete_league(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.repos.leagues.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register a team in a league
///
/// POST /api/leagues/:id/teams
pub async fn create_team(
    State(state): State<AppState>,
    Path(league_id): Path<Uuid>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    require_league(&state, league_id).await?;

    let team = Team::new(league_id, req.name, req.badge)?;
    state.repos.teams.save(&team).await?;

    tracing::info!(team_id = %team.id(), %league_id, "Team created");

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// Register a player with a team
///
/// POST /api/teams/:id/players
pub async fn create_player(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    if state.repos.teams.find_by_id(team_id).await?.is_none() {
        return Err(DomainError::not_found("Team", team_id).into());
    }

    let player = Player::new(team_id, req.name, req.price, req.is_goalkeeper)?;
    state.repos.players.save(&player).await?;

    tracing::info!(player_id = %player.id, %team_id, "Player registered");

    Ok((StatusCode::CREATED, Json(player)))
}

/// Open a new round in a league
///
/// POST /api/leagues/:id/rounds
pub async fn create_round(
    State(state): State<AppState>,
    Path(league_id): Path<Uuid>,
    Json(req): Json<CreateRoundRequest>,
) -> Result<(StatusCode, Json<Round>), ApiError> {
    require_league(&state, league_id).await?;

    let round = Round::new(league_id, req.number)?;
    state.repos.rounds.save(&round).await?;

    tracing::info!(round_id = %round.id, %league_id, number = round.number, "Round opened");

    Ok((StatusCode::CREATED, Json(round)))
}

/// Enrol a manager in a league
///
/// POST /api/leagues/:id/managers
pub async fn create_manager(
    State(state): State<AppState>,
    Path(league_id): Path<Uuid>,
    Json(req): Json<CreateManagerRequest>,
) -> Result<(StatusCode, Json<ManagerResponse>), ApiError> {
    require_league(&state, league_id).await?;

    let manager = Manager::new(league_id, req.name)?;
    state.repos.managers.save(&manager).await?;

    tracing::info!(manager_id = %manager.id(), %league_id, "Manager enrolled");

    Ok((StatusCode::CREATED, Json(ManagerResponse::from(&manager))))
}
