use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{report::models::ReportedQuestion, server::error::ServerError};

pub async fn create_reported_question(
    pool: &Pool<Postgres>,
    user_id: &Uuid,
    question: &str,
) -> Result<ReportedQuestion, ServerError> {
    let report = sqlx::query_as::<_, ReportedQuestion>(
        r#"
        INSERT INTO "reported_question" (user_id, question, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, question, created_at
        "#,
    )
    .bind(user_id)
    .bind(question)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(report)
}

pub async fn list_reported_questions_by_user(
    pool: &Pool<Postgres>,
    user_id: &Uuid,
) -> Result<Vec<ReportedQuestion>, sqlx::Error> {
    sqlx::query_as::<_, ReportedQuestion>(
        r#"
        SELECT id, user_id, question, created_at
        FROM "reported_question"
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
