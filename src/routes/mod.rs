pub mod extract;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::services::{NflQueryService, NflService};
use handlers::{
    ask_nfl_question_handler, cache_stats_handler, clear_cache_handler, get_game_boxscore_handler,
    get_health_handler, get_player_profile_handler, get_schedule_handler, get_standings_handler,
    get_team_profile_handler, get_teams_handler, get_weekly_injuries_handler,
};

#[derive(Clone)]
pub struct AppState {
    pub nfl: Arc<NflService>,
    pub query: Arc<NflQueryService>,
}

pub fn create_nfl_routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(get_teams_handler))
        .route("/teams/{team_id}", get(get_team_profile_handler))
        .route("/schedule/{year}/{season_type}", get(get_schedule_handler))
        .route("/players/{player_id}", get(get_player_profile_handler))
        .route("/games/{game_id}/boxscore", get(get_game_boxscore_handler))
        .route("/standings/{year}/{season_type}", get(get_standings_handler))
        .route(
            "/injuries/{year}/{season_type}/{week}",
            get(get_weekly_injuries_handler),
        )
        .route("/cache", get(cache_stats_handler).delete(clear_cache_handler))
        .route("/query", post(ask_nfl_question_handler))
}

pub fn create_health_routes() -> Router<AppState> {
    Router::new().route("/health", get(get_health_handler))
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/nfl", create_nfl_routes())
        .merge(create_health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
