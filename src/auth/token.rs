use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    auth::models::{Claims, UserAccount},
    server::error::ServerError,
};

pub fn issue_token(user: &UserAccount, secret: &str, ttl_hours: i64) -> Result<String, ServerError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServerError::Internal(format!("Failed to sign token: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ServerError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| ServerError::JwtVerification(format!("Failed to validate token: {}", e)))
}
