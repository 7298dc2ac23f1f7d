//! Argon2id password storage.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use std::sync::Arc;
use wayfarer_core::{WayfarerError, WayfarerResult};

/// Hashes and checks account passwords.
///
/// Output is a PHC string (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`) that
/// records its own parameters, so hashes made with one cost setting
/// still verify after the setting changes.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Argon2id with the crate's recommended parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Arc::new(Argon2::new(Algorithm::Argon2id, Version::V0x13, params)),
        }
    }

    /// Single-pass hasher using `memory_kib` of memory; for tests and
    /// constrained hosts. Out-of-range costs fall back to the defaults.
    #[must_use]
    pub fn with_memory_cost(memory_kib: u32) -> Self {
        Self::with_params(Params::new(memory_kib, 1, 1, None).unwrap_or(Params::DEFAULT))
    }

    /// Salts and hashes `password`.
    pub fn hash(&self, password: &str) -> WayfarerResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| WayfarerError::Internal(format!("argon2 hash: {e}")))
    }

    /// `Ok(false)` on a mismatch; `Err` only when `stored` is not a usable hash.
    pub fn verify(&self, password: &str, stored: &str) -> WayfarerResult<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| WayfarerError::Internal(format!("stored hash unreadable: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(WayfarerError::Internal(format!("argon2 verify: {e}"))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHasher(argon2id)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::with_memory_cost(64)
    }

    #[test]
    fn test_round_trip() {
        let hasher = cheap();
        let stored = hasher.hash("correct horse").unwrap();

        assert!(stored.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &stored).unwrap());
        assert!(!hasher.verify("Correct horse", &stored).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = cheap();
        assert_ne!(hasher.hash("secret").unwrap(), hasher.hash("secret").unwrap());
    }

    #[test]
    fn test_cost_change_keeps_old_hashes_valid() {
        let stored = cheap().hash("secret").unwrap();
        assert!(PasswordHasher::default().verify("secret", &stored).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error_not_a_mismatch() {
        assert!(matches!(
            cheap().verify("password", "plaintext-password"),
            Err(WayfarerError::Internal(_))
        ));
    }
}
