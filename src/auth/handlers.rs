use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use crate::{
    auth::{
        crypto::{hash_password, verify_login},
        db,
        models::{CredentialsRequest, LeaderboardQuery, Subject, TokenResponse},
        token::issue_token,
    },
    config::config::CONFIG,
    quiz::session::QuizSession,
    server::{app_state::AppState, error::ServerError},
};

pub fn public_auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(state)
}

pub fn protected_auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(get_account))
        .route("/logout", post(logout))
        .with_state(state)
}

pub fn leaderboard_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(get_leaderboard))
        .with_state(state)
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(ServerError::Api(
            StatusCode::BAD_REQUEST,
            "Username and password are required".into(),
        ));
    }

    let password_hash = hash_password(&request.password)?;
    let user = db::create_user(state.get_pool(), username, &password_hash).await?;
    info!("Registered user {}", user.username);

    Ok((StatusCode::CREATED, Json(user.strip())))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let user = db::get_user_by_username(state.get_pool(), request.username.trim()).await?;
    let stored_hash = user.as_ref().map(|user| user.password_hash.as_str());

    if !verify_login(&request.password, stored_hash)? {
        return Err(ServerError::InvalidCredentials);
    }

    let Some(user) = user else {
        return Err(ServerError::InvalidCredentials);
    };

    let token = issue_token(&user, &CONFIG.auth.jwt_secret, CONFIG.auth.token_ttl_hours)?;

    let generator = state.quiz_generator();
    let mut rng = ChaCha8Rng::from_os_rng();
    state
        .get_sessions()
        .start_if_missing(user.id, || QuizSession::start(&generator, &mut rng))?;

    info!("User {} logged in", user.username);
    Ok((StatusCode::OK, Json(TokenResponse { token })))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<impl IntoResponse, ServerError> {
    if state.get_sessions().clear(subject.user_id) {
        info!("Discarded quiz session for {}", subject.username);
    }

    Ok(StatusCode::OK)
}

async fn get_account(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<impl IntoResponse, ServerError> {
    let Some(user) = db::get_user_by_id(state.get_pool(), &subject.user_id).await? else {
        error!("Token for {} refers to a missing user", subject.username);
        return Err(ServerError::LoginRequired);
    };

    Ok((StatusCode::OK, Json(user.strip())))
}

/// Read-only, scores are never touched here.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let limit = query.limit_or(CONFIG.quiz.leaderboard_size);
    let entries = db::get_leaderboard(state.get_pool(), limit).await?;

    Ok((StatusCode::OK, Json(entries)))
}
