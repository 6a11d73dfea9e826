use actix_web::{get, web, HttpResponse};

use crate::error::GameError;
use crate::handlers::success;
use crate::models::{AppState, LimitQuery};
use crate::services::game::DEFAULT_LEADERBOARD_LIMIT;

const MAX_LEADERBOARD_LIMIT: usize = 100;

fn limit(query: &LimitQuery) -> usize {
    query
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT)
}

#[get("/api/leaderboard/post/{id}")]
pub async fn post_leaderboard(
    data: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, GameError> {
    let puzzle_id = path.into_inner();
    Ok(success(data.game.post_leaderboard(&puzzle_id, limit(&query))?))
}

#[get("/api/leaderboard/global")]
pub async fn global_leaderboard(
    data: web::Data<AppState>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, GameError> {
    let entries = data.game.global_leaderboard(limit(&query))?;
    Ok(success(serde_json::json!({ "entries": entries })))
}
