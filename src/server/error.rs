use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, warn};

use crate::{dataset::client::DatasetError, quiz::models::QuizError};

pub const LOGIN_PATH: &str = "/auth/login";
pub const RESULT_PATH: &str = "/quiz/result";

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Sqlx failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    #[error("Failed to verify jwt: {0}")]
    JwtVerification(String),

    #[error("Api error: {0} - {1}")]
    Api(StatusCode, String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Login required")]
    LoginRequired,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Sqlx(_)
            | ServerError::Migrate(_)
            | ServerError::Dataset(_)
            | ServerError::PasswordHash(_)
            | ServerError::Internal(_) => {
                error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            ServerError::Quiz(QuizError::SparseDataset { .. }) => {
                error!("{}", self);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Not enough country data to build a question",
                )
                    .into_response()
            }
            ServerError::Quiz(QuizError::RoundComplete) => Redirect::to(RESULT_PATH).into_response(),
            ServerError::Quiz(e @ QuizError::RoundInProgress) => {
                (StatusCode::CONFLICT, e.to_string()).into_response()
            }
            ServerError::Quiz(e @ QuizError::MissingAnswer) => {
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            ServerError::JwtVerification(ref reason) => {
                warn!("Rejected token: {}", reason);
                Redirect::to(LOGIN_PATH).into_response()
            }
            ServerError::LoginRequired => Redirect::to(LOGIN_PATH).into_response(),
            ServerError::Api(status, msg) => (status, msg).into_response(),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ServerError::UsernameTaken => (StatusCode::CONFLICT, self.to_string()).into_response(),
            ServerError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
            }
        }
    }
}
