//! Argon2 password hashing
//!
//! Hashes are PHC strings carrying their own salt and parameters. The async
//! wrappers move the work off the runtime threads.

use std::sync::OnceLock;

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use shared::AppError;

/// Minimum password length accepted on signup and account creation
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash. A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub async fn hash_password_async(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking join error: {e}");
            AppError::internal("Password hashing failed")
        })?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

pub async fn verify_password_async(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            tracing::error!("spawn_blocking join error: {e}");
            AppError::internal("Password verification failed")
        })
}

/// Run one verification against a throwaway hash.
///
/// Used when the login email is unknown so the response takes as long as a
/// wrong-password attempt.
/// The throwaway hash is built lazily inside the blocking task as well.
pub async fn burn_verification(password: String) -> Result<(), AppError> {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    tokio::task::spawn_blocking(move || {
        let hash = DUMMY_HASH.get_or_init(|| hash_password("staffdesk-placeholder").ok());
        if let Some(hash) = hash {
            verify_password(&password, hash);
        }
    })
    .await
    .map_err(|e| {
        tracing::error!("spawn_blocking join error: {e}");
        AppError::internal("Password verification failed")
    })
}
