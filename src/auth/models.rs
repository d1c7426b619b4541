use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated caller, inserted into request extensions by `auth_mw`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Subject {
    pub user_id: Uuid,
    pub username: String,
}

impl From<Claims> for Subject {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn strip(&self) -> AccountResponse {
        AccountResponse {
            id: self.id,
            username: self.username.clone(),
            score: self.score,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LeaderboardQuery {
    pub limit: Option<u16>,
}

impl LeaderboardQuery {
    pub fn limit_or(&self, max: u16) -> u16 {
        self.limit.map_or(max, |limit| limit.clamp(1, max))
    }
}
