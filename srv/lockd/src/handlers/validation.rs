use actix_web::{post, web, Responder};
use log::debug;
use serde::Serialize;

use crate::handlers::success;
use crate::models::{AppState, WordRequest};

#[derive(Serialize)]
struct WordValidity {
    valid: bool,
}

#[post("/api/validate-word")]
pub async fn validate_word(
    data: web::Data<AppState>,
    body: web::Json<WordRequest>,
) -> impl Responder {
    let word = body.into_inner().word.unwrap_or_default();
    let valid = data.game.validate_word(&word);
    debug!("Word check ({} letters): {}", word.trim().len(), valid);

    success(WordValidity { valid })
}
