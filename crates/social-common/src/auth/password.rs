//! Password hashing and verification utilities
//!
//! Uses Argon2id with a random salt per hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
/// Returns an error if the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Validate password strength
///
/// A password needs 8-128 characters with at least one letter and one digit.
///
/// # Errors
/// Returns a validation error naming the first unmet rule
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    let rules: [(bool, &str); 4] = [
        (
            len >= MIN_PASSWORD_LEN,
            "Password must be at least 8 characters long",
        ),
        (
            len <= MAX_PASSWORD_LEN,
            "Password must be at most 128 characters long",
        ),
        (
            password.chars().any(char::is_alphabetic),
            "Password must contain at least one letter",
        ),
        (
            password.chars().any(|c| c.is_ascii_digit()),
            "Password must contain at least one digit",
        ),
    ];

    match rules.iter().find(|(ok, _)| !ok) {
        Some((_, message)) => Err(AppError::Validation((*message).to_string())),
        None => Ok(()),
    }
}
