use std::sync::Arc;

use axum::{
    Extension, Json, Router, extract::State, http::StatusCode, response::IntoResponse,
    routing::get,
};

use crate::{
    auth::models::Subject,
    report::db,
    server::{app_state::AppState, error::ServerError},
};

pub fn report_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_own_reports))
        .with_state(state)
}

async fn list_own_reports(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<impl IntoResponse, ServerError> {
    let reports = db::list_reported_questions_by_user(state.get_pool(), &subject.user_id).await?;
    Ok((StatusCode::OK, Json(reports)))
}
