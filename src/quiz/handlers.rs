use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info};

use crate::{
    auth::{db::add_user_score, models::Subject},
    quiz::{
        models::{AnswerRequest, AnswerResponse},
        session::QuizSession,
    },
    report::db::create_reported_question,
    server::{app_state::AppState, error::ServerError},
};

pub fn quiz_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(get_current_question))
        .route("/answer", post(submit_answer))
        .route("/result", get(get_result))
        .with_state(state)
}

async fn get_current_question(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<impl IntoResponse, ServerError> {
    let generator = state.quiz_generator();
    let mut rng = ChaCha8Rng::from_os_rng();
    let sessions = state.get_sessions();

    sessions.start_if_missing(subject.user_id, || QuizSession::start(&generator, &mut rng))?;

    let view = sessions
        .with_session(subject.user_id, |session| {
            session.current_question(&generator, &mut rng)
        })
        .ok_or(ServerError::LoginRequired)??;

    Ok((StatusCode::OK, Json(view)))
}

async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(request): Json<AnswerRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let sessions = state.get_sessions();
    let (previous, outcome) = {
        let generator = state.quiz_generator();
        let mut rng = ChaCha8Rng::from_os_rng();

        sessions
            .with_session(subject.user_id, |session| {
                let previous = session.clone();
                session
                    .submit(&request, &generator, &mut rng)
                    .map(|outcome| (previous, outcome))
            })
            .ok_or(ServerError::LoginRequired)??
    };

    if let Some(question) = &outcome.reported_question {
        if let Err(e) = create_reported_question(state.get_pool(), &subject.user_id, question).await
        {
            error!("Failed to persist report from {}: {}", subject.username, e);
            sessions.rollback(subject.user_id, previous);
            return Err(e);
        }
        info!("User {} reported question: {}", subject.username, question);
    }

    debug!(
        "User {} has {} questions left",
        subject.username,
        previous.remaining().saturating_sub(1)
    );

    Ok((StatusCode::OK, Json(AnswerResponse::from(outcome))))
}

async fn get_result(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<impl IntoResponse, ServerError> {
    let sessions = state.get_sessions();
    let Some(session) = sessions.take_completed(subject.user_id)? else {
        return Err(ServerError::LoginRequired);
    };

    if let Err(e) = add_user_score(state.get_pool(), &subject.user_id, session.score()).await {
        error!("Failed to persist score for {}: {}", subject.username, e);
        sessions.restore(subject.user_id, session);
        return Err(e);
    }

    let result = session.into_result()?;
    info!("User {} finished a round with {} points", subject.username, result.score);

    Ok((StatusCode::OK, Json(result)))
}
