//! Password hashing and verification.
//!
//! bcrypt with [`DEFAULT_COST`]. The salt is embedded in the produced hash,
//! so verifying only needs the plaintext and the stored string.

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hash of a password nobody has, at the same cost as real ones.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("sno-no-such-user", DEFAULT_COST).ok());

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` for a wrong password and `Err` only when `hash` is
/// not a bcrypt hash at all.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Spends one bcrypt verification for a login that has no stored hash, so
/// an unknown login costs as much as a wrong password. Always `false`.
pub fn verify_without_user(password: &str) -> bool {
    if let Some(dummy) = DUMMY_HASH.as_deref() {
        let _ = verify(password, dummy);
    }
    false
}
