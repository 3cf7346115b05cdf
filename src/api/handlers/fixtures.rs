use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::errors::DomainError;
use crate::domain::fixture::{Match, MatchOutcome, PerformanceRecord, PerformanceStats};
use crate::domain::scoring::PlayerSeasonTotals;

/// Request body for recording a finalized match
#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_goals: i32,
    pub away_goals: i32,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: Uuid,
    pub round_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_goals: u32,
    pub away_goals: u32,
    pub outcome: MatchOutcome,
}

impl From<&Match> for MatchResponse {
    fn from(m: &Match) -> Self {
        Self {
            id: m.id(),
            round_id: m.round_id(),
            home_team_id: m.home_team_id(),
            away_team_id: m.away_team_id(),
            home_goals: m.home_goals(),
            away_goals: m.away_goals(),
            outcome: m.outcome(),
        }
    }
}

/// Request body for a ledger entry; `points` is precomputed upstream
#[derive(Debug, Deserialize)]
pub struct RecordPerformanceRequest {
    pub player_id: Uuid,
    #[serde(flatten)]
    pub stats: PerformanceStats,
    pub points: i32,
}

/// Record a finalized match in a round
///
/// POST /api/rounds/:id/matches
pub async fn create_match(
    State(state): State<AppState>,
    Path(round_id): Path<Uuid>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<MatchResponse>), ApiError> {
    let m = Match::new(
        round_id,
        req.home_team_id,
        req.away_team_id,
        req.home_goals,
        req.away_goals,
    )?;

    let round = state
        .repos
        .rounds
        .find_by_id(round_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Round", round_id))?;

    for team_id in [req.home_team_id, req.away_team_id] {
        let team = state
            .repos
            .teams
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team", team_id))?;
        if team.league_id() != round.league_id {
            return Err(ApiError::bad_request(format!(
                "Team {} does not belong to the round's league",
                team_id
            )));
        }
    }

    state.repos.matches.save(&m).await?;

    tracing::info!(match_id = %m.id(), %round_id, outcome = ?m.outcome(), "Match recorded");
    Ok((StatusCode::CREATED, Json(MatchResponse::from(&m))))
}

/// Append a performance record to the ledger
///
/// POST /api/matches/:id/performances
pub async fn record_performance(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
    Json(req): Json<RecordPerformanceRequest>,
) -> Result<(StatusCode, Json<PerformanceRecord>), ApiError> {
    let m = state
        .repos
        .matches
        .find_by_id(match_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Match", match_id))?;
    let player = state
        .repos
        .players
        .find_by_id(req.player_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Player", req.player_id))?;

    // Only players of the two competing teams can have played the match
    if !m.involves(player.team_id) {
        return Err(ApiError::bad_request(format!(
            "Player {} does not belong to either team of match {}",
            player.id, match_id
        )));
    }

    let record = PerformanceRecord::new(player.id, match_id, req.stats, req.points);
    state.repos.performances.save(&record).await?;

    tracing::info!(%match_id, player_id = %player.id, points = record.points, "Performance recorded");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Season totals of a player's ledger entries
///
/// GET /api/players/:id/totals
pub async fn player_totals(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<PlayerSeasonTotals>, ApiError> {
    if state.repos.players.find_by_id(player_id).await?.is_none() {
        return Err(DomainError::not_found("Player", player_id).into());
    }

    let totals = state.ledger().player_totals(player_id).await?;
    Ok(Json(totals))
}
