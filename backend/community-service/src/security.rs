//! Anonymous author credentials
//!
//! Posts carry an Argon2id PHC hash of the password chosen by their author.
//! Editing or deleting requires presenting the same password again.

use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password with Argon2id and a random salt
pub fn credential_hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Check `password` against the stored hash.
///
/// Rows stored without a hash cannot be changed anonymously.
pub fn verify_credential(stored_hash: Option<&str>, password: &str) -> Result<()> {
    let stored = stored_hash
        .filter(|h| !h.is_empty())
        .ok_or(AppError::AuthorizationMismatch)?;

    let parsed = PasswordHash::new(stored).map_err(|e| {
        tracing::error!(error = %e, "Stored credential is not a valid password hash");
        AppError::AuthorizationMismatch
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(argon2::password_hash::Error::Password) => Err(AppError::AuthorizationMismatch),
        Err(e) => Err(AppError::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
