// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::{fixtures, health, leagues, rankings, rosters};
pub use state::AppState;

/// Builds the HTTP router over the given state
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // League setup
        .route("/api/leagues", post(leagues::create_league))
        .route(
            "/api/leagues/:id",
            get(leagues::get_league).delete(leagues::delete_league),
        )
        .route("/api/leagues/:id/teams", post(leagues::create_team))
        .route("/api/leagues/:id/rounds", post(leagues::create_round))
        .route("/api/leagues/:id/managers", post(leagues::create_manager))
        .route("/api/teams/:id/players", post(leagues::create_player))
        // Results and the performance ledger
        .route("/api/rounds/:id/matches", post(fixtures::create_match))
        .route(
            "/api/matches/:id/performances",
            post(fixtures::record_performance),
        )
        .route("/api/players/:id/totals", get(fixtures::player_totals))
        // Rosters and scoring
        .route("/api/rounds/:id/rosters", post(rosters::submit_roster))
        .route("/api/rosters/:id", put(rosters::replace_roster_players))
        .route("/api/rosters/:id/score", post(rosters::score_roster))
        .route("/api/rounds/:id/score", post(rosters::score_round))
        // Rankings
        .route("/api/leagues/:id/standings", get(rankings::league_standings))
        .route("/api/teams/:id/standing", get(rankings::team_standing))
        .route("/api/leagues/:id/leaderboard", get(rankings::leaderboard))
        .route(
            "/api/leagues/:league_id/managers/:manager_id/position",
            get(rankings::manager_position),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state)
}
