use std::collections::BTreeSet;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::errors::DomainError;
use crate::domain::roster::Roster;

/// Request body for submitting a roster
///
/// Duplicate player ids are accepted and collapse to one selection.
#[derive(Debug, Deserialize)]
pub struct SubmitRosterRequest {
    pub manager_id: Uuid,
    pub player_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ReplacePlayersRequest {
    pub player_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub id: Uuid,
    pub manager_id: Uuid,
    pub round_id: Uuid,
    pub player_ids: Vec<Uuid>,
    pub total: Option<i32>,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Roster> for RosterResponse {
    fn from(roster: &Roster) -> Self {
        Self {
            id: roster.id(),
            manager_id: roster.manager_id(),
            round_id: roster.round_id(),
            player_ids: roster.player_ids().iter().copied().collect(),
            total: roster.cached_total(),
            submitted_at: roster.submitted_at(),
        }
    }
}

/// Submit a manager's roster for a round
///
/// POST /api/rounds/:id/rosters
pub async fn submit_roster(
    State(state): State<AppState>,
    Path(round_id): Path<Uuid>,
    Json(req): Json<SubmitRosterRequest>,
) -> Result<(StatusCode, Json<RosterResponse>), ApiError> {
    let round = state
        .repos
        .rounds
        .find_by_id(round_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Round", round_id))?;
    let manager = state
        .repos
        .managers
        .find_by_id(req.manager_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Manager", req.manager_id))?;
    if manager.league_id() != round.league_id {
        return Err(ApiError::bad_request(
            "Manager and round belong to different leagues",
        ));
    }

    let (roster, events) = Roster::new(manager.id(), round.id, req.player_ids)?;
    ensure_players_in_league(&state, roster.player_ids(), round.league_id).await?;

    state.repos.rosters.save(&roster).await?;
    for event in &events {
        tracing::info!(roster_id = %event.roster_id(), "Roster submitted");
    }

    Ok((StatusCode::CREATED, Json(RosterResponse::from(&roster))))
}

/// Replace the player selection of a submitted roster
///
/// The cached total is dropped until the roster is scored again.
///
/// PUT /api/rosters/:id
pub async fn replace_roster_players(
    State(state): State<AppState>,
    Path(roster_id): Path<Uuid>,
    Json(req): Json<ReplacePlayersRequest>,
) -> Result<Json<RosterResponse>, ApiError> {
    let mut roster = state
        .repos
        .rosters
        .find_by_id(roster_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Roster", roster_id))?;
    let round = state
        .repos
        .rounds
        .find_by_id(roster.round_id())
        .await?
        .ok_or_else(|| DomainError::not_found("Round", roster.round_id()))?;

    let event = roster.replace_players(req.player_ids)?;
    ensure_players_in_league(&state, roster.player_ids(), round.league_id).await?;

    state.repos.rosters.save(&roster).await?;
    tracing::info!(roster_id = %event.roster_id(), "Roster players replaced");

    Ok(Json(RosterResponse::from(&roster)))
}

/// Every selected player must exist and play for a team of `league_id`
async fn ensure_players_in_league(
    state: &AppState,
    player_ids: &BTreeSet<Uuid>,
    league_id: Uuid,
) -> Result<(), ApiError> {
    for player_id in player_ids {
        let player = state
            .repos
            .players
            .find_by_id(*player_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Player", *player_id))?;
        let team = state
            .repos
            .teams
            .find_by_id(player.team_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Team", player.team_id))?;

        if team.league_id() != league_id {
            return Err(ApiError::bad_request(format!(
                "Player {} does not play in the round's league",
                player_id
            )));
        }
    }
    Ok(())
}

/// Recompute one roster's round score
///
/// POST /api/rosters/:id/score
pub async fn score_roster(
    State(state): State<AppState>,
    Path(roster_id): Path<Uuid>,
) -> Result<Json<RosterResponse>, ApiError> {
    let roster = state.aggregator().rescore(roster_id).await?;
    Ok(Json(RosterResponse::from(&roster)))
}

/// Recompute every roster of a round
///
/// POST /api/rounds/:id/score
pub async fn score_round(
    State(state): State<AppState>,
    Path(round_id): Path<Uuid>,
) -> Result<Json<Vec<RosterResponse>>, ApiError> {
    let rosters = state.aggregator().score_round(round_id).await?;
    Ok(Json(rosters.iter().map(RosterResponse::from).collect()))
}
