use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{PasswordHash, SaltString},
};
use once_cell::sync::Lazy;
use rand::Rng;

use crate::server::error::ServerError;

pub fn hash_password(password: &str) -> Result<String, ServerError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| ServerError::PasswordHash(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServerError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServerError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ServerError::PasswordHash(format!("invalid stored hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Verified against when a login names an unknown user, so both paths pay for one Argon2 run.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("unknown-user").ok());

/// `None` means no such user. The result is then always false.
pub fn verify_login(password: &str, stored_hash: Option<&str>) -> Result<bool, ServerError> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = verify_password(password, dummy);
            }
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("hunter2").unwrap();

        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("hunter2", "not-a-phc-string").is_err());
    }

    #[test]
    fn unknown_user_never_verifies() {
        assert!(!verify_login("unknown-user", None).unwrap());
        assert!(!verify_login("hunter2", None).unwrap());
        assert!(DUMMY_HASH.is_some());
    }

    #[test]
    fn known_user_verifies_against_stored_hash() {
        let hash = hash_password("hunter2").unwrap();

        assert!(verify_login("hunter2", Some(&hash)).unwrap());
        assert!(!verify_login("hunter3", Some(&hash)).unwrap());
    }
}
