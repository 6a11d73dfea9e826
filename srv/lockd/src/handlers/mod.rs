use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::error::GameError;
use crate::models::ApiResponse;

pub mod leaderboard;
pub mod puzzle;
pub mod stats;
pub mod validation;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_NAME_HEADER: &str = "X-User-Name";

/// Register every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(puzzle::get_puzzle)
        .service(puzzle::submit_guess)
        .service(puzzle::create_puzzle)
        .service(puzzle::create_daily_puzzle)
        .service(puzzle::create_welcome_puzzle)
        .service(stats::get_stats)
        .service(stats::get_achievements)
        .service(leaderboard::post_leaderboard)
        .service(leaderboard::global_leaderboard)
        .service(validation::validate_word);
}

/// The authenticated caller, as forwarded by the hosting platform.
pub struct Caller {
    pub user_id: String,
    pub username: Option<String>,
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn caller(req: &HttpRequest) -> Option<Caller> {
    header(req, USER_ID_HEADER).map(|user_id| Caller {
        user_id,
        username: header(req, USER_NAME_HEADER),
    })
}

pub fn require_caller(req: &HttpRequest, message: &str) -> Result<Caller, GameError> {
    caller(req).ok_or_else(|| GameError::Validation(message.to_string()))
}

pub fn success<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::Success { data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppState;
    use crate::services::game::{GameService, Stores};
    use crate::services::word_loader::WordList;
    use crate::store::MemoryStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn state() -> web::Data<AppState> {
        let words: WordList = ["crane", "slate", "lock"].iter().map(|w| w.to_string()).collect();
        let stores = Stores::in_memory(Arc::new(MemoryStore::new()));
        let game = GameService::new(stores, Arc::new(words)).with_seed(3);
        web::Data::new(AppState { game, daily_length: 5, welcome_length: 4 })
    }

    #[actix_web::test]
    async fn test_create_then_play() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/create")
            .insert_header((USER_ID_HEADER, "u1"))
            .insert_header((USER_NAME_HEADER, "alice"))
            .set_json(json!({ "word": "crane" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "success");
        let id = body["data"]["puzzleId"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/puzzle/{}", id))
            .insert_header((USER_ID_HEADER, "u2"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let puzzle = &body["data"]["puzzle"];
        assert_eq!(puzzle["wordLength"], 5);
        assert_eq!(puzzle["creatorName"], "alice");
        assert_eq!(body["data"]["isCreator"], false);
        assert!(!body.to_string().contains("crane"));
        assert!(!body.to_string().contains("correctIndex"));

        let req = test::TestRequest::post()
            .uri(&format!("/api/puzzle/{}/guess", id))
            .insert_header((USER_ID_HEADER, "u2"))
            .insert_header((USER_NAME_HEADER, "bob"))
            .set_json(json!({ "guess": "slate" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["gameStatus"], "playing");
        assert_eq!(body["data"]["attemptsRemaining"], 5);
        assert!(body["data"].get("answer").is_none());

        let req = test::TestRequest::post()
            .uri(&format!("/api/puzzle/{}/guess", id))
            .insert_header((USER_ID_HEADER, "u2"))
            .set_json(json!({ "guess": "crane" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["gameStatus"], "solved");
        assert_eq!(body["data"]["answer"], "crane");
        assert_eq!(body["data"]["newAchievements"], json!(["first_crack"]));

        let req = test::TestRequest::get()
            .uri(&format!("/api/leaderboard/post/{}", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["totalSolvers"], 1);
        assert_eq!(body["data"]["entries"][0], json!({ "username": "bob", "score": 2, "rank": 1 }));

        let req = test::TestRequest::get()
            .uri("/api/stats")
            .insert_header((USER_ID_HEADER, "u2"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["stats"]["totalSolved"], 1);
        assert_eq!(body["data"]["difficulty"], "easy");
    }

    #[actix_web::test]
    async fn test_error_statuses() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/puzzle/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "status": "error", "message": "Puzzle not found" }));

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/create")
            .insert_header((USER_ID_HEADER, "u1"))
            .set_json(json!({ "word": "zz" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Word must be 3-6 letters");

        let req = test::TestRequest::post()
            .uri("/api/puzzle/missing/guess")
            .set_json(json!({ "guess": "crane" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_internal_puzzles_and_catalog() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post().uri("/internal/daily-puzzle").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["puzzleId"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri(&format!("/api/puzzle/{}", id)).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["puzzle"]["isDaily"], true);
        assert_eq!(body["data"]["puzzle"]["difficulty"], "medium");

        let req = test::TestRequest::post().uri("/internal/welcome-puzzle").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/achievements").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 6);

        let req = test::TestRequest::post()
            .uri("/api/validate-word")
            .set_json(json!({ "word": "LOCK" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["valid"], true);

        let req = test::TestRequest::get().uri("/api/leaderboard/global?limit=5").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["entries"], json!([]));
    }
}
