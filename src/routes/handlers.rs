use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use serde_json::Value;

use super::extract::{JsonBody, Path};
use super::AppState;
use crate::error::{ApiError, Result};
use crate::models::schemas::{ClearCacheResponse, HealthResponse, NflQuery, NflQueryResponse};
use crate::models::CacheStats;

// ============================================================
// Resource Handlers
// ============================================================

pub async fn get_teams_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(state.nfl.get_teams().await?))
}

pub async fn get_schedule_handler(
    State(state): State<AppState>,
    Path((year, season_type)): Path<(u16, String)>,
) -> Result<Json<Value>> {
    Ok(Json(state.nfl.get_schedule(year, &season_type).await?))
}

pub async fn get_team_profile_handler(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(state.nfl.get_team_profile(&team_id).await?))
}

pub async fn get_player_profile_handler(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(state.nfl.get_player_profile(&player_id).await?))
}

pub async fn get_game_boxscore_handler(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Value>> {
    Ok(Json(state.nfl.get_game_boxscore(&game_id).await?))
}

pub async fn get_standings_handler(
    State(state): State<AppState>,
    Path((year, season_type)): Path<(u16, String)>,
) -> Result<Json<Value>> {
    Ok(Json(state.nfl.get_standings(year, &season_type).await?))
}

pub async fn get_weekly_injuries_handler(
    State(state): State<AppState>,
    Path((year, season_type, week)): Path<(u16, String, String)>,
) -> Result<Json<Value>> {
    Ok(Json(
        state
            .nfl
            .get_weekly_injuries(year, &season_type, &week)
            .await?,
    ))
}

// ============================================================
// Cache Handlers
// ============================================================

pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.nfl.clear_cache();
    Json(ClearCacheResponse {
        message: "Cache cleared successfully".to_string(),
        cleared,
    })
}

pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.nfl.cache_stats())
}

// ============================================================
// Query Handlers
// ============================================================

pub async fn ask_nfl_question_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NflQuery>,
) -> Result<Json<NflQueryResponse>> {
    if payload.query.trim().is_empty() {
        return Err(ApiError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "query must not be empty".to_string(),
        });
    }
    Ok(Json(state.query.process_query(&payload.query).await))
}

// ============================================================
// Health Handlers
// ============================================================

pub async fn get_health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
