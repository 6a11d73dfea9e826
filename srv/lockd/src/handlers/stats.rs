use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::error::GameError;
use crate::handlers::{require_caller, success};
use crate::models::{AppState, ACHIEVEMENTS};

#[get("/api/stats")]
pub async fn get_stats(
    data: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, GameError> {
    let user = require_caller(&req, "Not logged in")?;
    Ok(success(data.game.user_stats(&user.user_id)?))
}

#[get("/api/achievements")]
pub async fn get_achievements() -> HttpResponse {
    success(ACHIEVEMENTS)
}
