//! Password hashing with argon2.

use super::error::UserError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::{debug, instrument, warn};

/// Hashes a plain-text password with a fresh random salt.
#[instrument(skip(password))]
pub fn hash_password(password: &str) -> Result<String, UserError> {
    if password.is_empty() {
        return Err(UserError::ValidationError("password cannot be empty".into()));
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UserError::CredentialError(e.to_string()))?;
    debug!("Password hashed");
    Ok(hash.to_string())
}

/// Checks `password` against a stored hash. A mismatch is `Ok(false)`, not an error.
#[instrument(skip_all)]
pub fn verify_password(stored_hash: &str, password: &str) -> Result<bool, UserError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        warn!(error = %e, "Stored hash is malformed");
        UserError::CredentialError(e.to_string())
    })?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(UserError::CredentialError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("hunter22").unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password(&hash, "hunter22").unwrap());
        assert!(!verify_password(&hash, "hunter23").unwrap());
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(hash_password(""), Err(UserError::ValidationError(_))));
    }
}
