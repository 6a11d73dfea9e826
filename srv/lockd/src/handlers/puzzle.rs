use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::{error, info};
use serde::Serialize;

use crate::error::GameError;
use crate::handlers::{caller, require_caller, success};
use crate::models::{AppState, GuessRequest, WordRequest};
use crate::services::game::ANONYMOUS;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedPuzzle {
    puzzle_id: String,
}

#[get("/api/puzzle/{id}")]
pub async fn get_puzzle(
    data: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, GameError> {
    let puzzle_id = path.into_inner();
    let user = caller(&req);
    let snapshot = data
        .game
        .load_puzzle(&puzzle_id, user.as_ref().map(|c| c.user_id.as_str()))?;
    Ok(success(snapshot))
}

#[post("/api/puzzle/{id}/guess")]
pub async fn submit_guess(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<GuessRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, GameError> {
    let puzzle_id = path.into_inner();
    let user = require_caller(&req, "Must be logged in to guess")?;
    if let Some(name) = &user.username {
        data.game.identify(&user.user_id, name)?;
    }

    let guess = body.into_inner().guess.unwrap_or_default();
    let outcome = data.game.submit_guess(&puzzle_id, &user.user_id, &guess)?;
    Ok(success(outcome))
}

#[post("/api/create")]
pub async fn create_puzzle(
    data: web::Data<AppState>,
    body: web::Json<WordRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, GameError> {
    let user = require_caller(&req, "Must be logged in")?;
    let creator_name = user.username.clone().unwrap_or_else(|| ANONYMOUS.to_string());
    data.game.identify(&user.user_id, &creator_name)?;

    let word = body.into_inner().word.unwrap_or_default();
    let puzzle_id = data.game.create_custom_puzzle(&user.user_id, &creator_name, &word)?;
    Ok(success(CreatedPuzzle { puzzle_id }))
}

#[post("/internal/daily-puzzle")]
pub async fn create_daily_puzzle(data: web::Data<AppState>) -> Result<HttpResponse, GameError> {
    let puzzle_id = data.game.create_daily_puzzle(data.daily_length)?;
    info!("Daily puzzle {} created on request", puzzle_id);
    Ok(success(CreatedPuzzle { puzzle_id }))
}

#[post("/internal/welcome-puzzle")]
pub async fn create_welcome_puzzle(data: web::Data<AppState>) -> Result<HttpResponse, GameError> {
    match data.game.create_welcome_puzzle(data.welcome_length) {
        Ok(puzzle_id) => Ok(success(CreatedPuzzle { puzzle_id })),
        Err(e) => {
            error!("Welcome puzzle creation failed: {}", e);
            Err(e)
        }
    }
}
