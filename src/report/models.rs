use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question a player flagged as wrong or broken. Never updated.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ReportedQuestion {
    pub id: i64,
    pub user_id: Uuid,
    pub question: String,
    pub created_at: DateTime<Utc>,
}
