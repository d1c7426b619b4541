use chrono::Utc;
use sqlx::{Pool, Postgres};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::models::{LeaderboardEntry, UserAccount},
    server::error::ServerError,
};

/// Uniqueness is enforced by the `username` constraint, not by a prior lookup.
pub async fn create_user(
    pool: &Pool<Postgres>,
    username: &str,
    password_hash: &str,
) -> Result<UserAccount, ServerError> {
    let user = sqlx::query_as::<_, UserAccount>(
        r#"
        INSERT INTO "quiz_user" (id, username, password_hash, score, created_at)
        VALUES ($1, $2, $3, 0, $4)
        ON CONFLICT (username) DO NOTHING
        RETURNING id, username, password_hash, score, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    let Some(user) = user else {
        info!("Registration rejected, username {} is taken", username);
        return Err(ServerError::UsernameTaken);
    };

    Ok(user)
}

pub async fn get_user_by_username(
    pool: &Pool<Postgres>,
    username: &str,
) -> Result<Option<UserAccount>, sqlx::Error> {
    sqlx::query_as::<_, UserAccount>(
        r#"
        SELECT id, username, password_hash, score, created_at
        FROM "quiz_user"
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn get_user_by_id(
    pool: &Pool<Postgres>,
    user_id: &Uuid,
) -> Result<Option<UserAccount>, sqlx::Error> {
    sqlx::query_as::<_, UserAccount>(
        r#"
        SELECT id, username, password_hash, score, created_at
        FROM "quiz_user"
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn add_user_score(
    pool: &Pool<Postgres>,
    user_id: &Uuid,
    delta: u32,
) -> Result<(), ServerError> {
    let delta = i32::try_from(delta)
        .map_err(|_| ServerError::Internal(format!("Score delta {} out of range", delta)))?;

    let row = sqlx::query(
        r#"
        UPDATE "quiz_user"
        SET score = score + $1
        WHERE id = $2
        "#,
    )
    .bind(delta)
    .bind(user_id)
    .execute(pool)
    .await?;

    if row.rows_affected() == 0 {
        warn!("Query failed, no user with id: {}", user_id);
        return Err(ServerError::NotFound("User does not exist".into()));
    }

    Ok(())
}

pub async fn get_leaderboard(
    pool: &Pool<Postgres>,
    limit: u16,
) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT username, score
        FROM "quiz_user"
        ORDER BY score DESC, username ASC
        LIMIT $1
        "#,
    )
    .bind(limit as i64)
    .fetch_all(pool)
    .await
}
