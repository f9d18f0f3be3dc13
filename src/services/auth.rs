//! Authentication service
//!
//! Argon2 password hashing and the credential check behind POST /login.
//! Earlier drafts of this application compared SHA-256 digests or even
//! plaintext; only PHC-format argon2 hashes are accepted now.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

use crate::database::DatabaseService;
use crate::models::user::User;
use crate::utils::errors::{EscolarError, Result};

/// Hash a password into PHC string format
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| EscolarError::Config(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash. Malformed hashes fail
/// verification instead of erroring.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[derive(Clone)]
pub struct AuthService {
    db: DatabaseService,
}

impl AuthService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Check credentials and return the matching user.
    ///
    /// Unknown email and wrong password both produce `InvalidCredentials`,
    /// so the login page cannot be used to enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = match self.db.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                warn!(email = email, "Login attempt for unknown email");
                return Err(EscolarError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash) {
            warn!(email = email, "Login attempt with wrong password");
            return Err(EscolarError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_correct_password() {
        let hash = hash_password("clave-segura-123").expect("should hash");
        assert!(!hash.is_empty());
        assert!(verify_password("clave-segura-123", &hash));
    }

    #[test]
    fn test_wrong_password_fails_verification() {
        let hash = hash_password("correcta").expect("should hash");
        assert!(!verify_password("incorrecta", &hash));
    }

    #[test]
    fn test_two_hashes_of_same_password_differ() {
        let h1 = hash_password("misma-clave").expect("should hash");
        let h2 = hash_password("misma-clave").expect("should hash");
        assert_ne!(h1, h2);
        assert!(verify_password("misma-clave", &h1));
        assert!(verify_password("misma-clave", &h2));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        assert!(!verify_password("cualquiera", "not-a-valid-hash"));
        assert!(!verify_password("cualquiera", ""));
        // Legacy SHA-256 digests from old drafts must not verify
        assert!(!verify_password(
            "cualquiera",
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        ));
    }

    #[test]
    fn test_hash_output_is_phc_format() {
        let hash = hash_password("prueba").expect("should hash");
        assert!(hash.starts_with("$argon2"));
    }
}
