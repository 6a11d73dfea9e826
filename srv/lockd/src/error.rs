use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ApiResponse;

/// Rejections surfaced to callers of the game service.
///
/// Rejections other than `Internal` leave no state behind: every check runs
/// before anything is written.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Already solved")]
    AlreadySolved,

    #[error("No attempts remaining")]
    AttemptsExhausted,

    #[error("Cannot play your own puzzle")]
    CreatorCannotPlay,

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for GameError {
    fn status_code(&self) -> StatusCode {
        match self {
            GameError::Validation(_)
            | GameError::AlreadySolved
            | GameError::AttemptsExhausted
            | GameError::CreatorCannotPlay => StatusCode::BAD_REQUEST,
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::Error {
            message: self.to_string(),
        })
    }
}

/// Failures of the storage collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,

    #[error("corrupt record at {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode record at {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("No words of length {0} in dictionary")]
    NoWords(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(GameError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GameError::AlreadySolved.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GameError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            GameError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_illegal_state_messages_differ() {
        assert_eq!(GameError::AlreadySolved.to_string(), "Already solved");
        assert_eq!(GameError::AttemptsExhausted.to_string(), "No attempts remaining");
    }
}
