//! JWT token provider for issuing and verifying access tokens.

use super::Claims;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};
use wayfarer_config::SecurityConfig;
use wayfarer_core::{UserId, WayfarerError, WayfarerResult};

/// Message returned for every token failure, whatever the cause.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// A freshly issued access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// JWT token provider service.
///
/// Tokens are HS256-signed, carry the subject id and email, and are
/// valid for a fixed window from issuance. There is no refresh and no
/// revocation list.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    lifetime_secs: u64,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: &SecurityConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.validate_exp = true;

        Self {
            encoding_key,
            decoding_key,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            lifetime_secs: config.jwt_access_expiration_secs,
            validation,
        }
    }

    /// Returns the configured token lifetime in seconds.
    #[must_use]
    pub const fn lifetime_secs(&self) -> u64 {
        self.lifetime_secs
    }

    /// Issues a token binding `user_id` and `email`.
    pub fn issue(&self, user_id: UserId, email: &str) -> WayfarerResult<IssuedToken> {
        let issued_at = Utc::now();
        let (lifetime, expires_at) = i64::try_from(self.lifetime_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Some((lifetime, issued_at.checked_add_signed(lifetime)?)))
            .ok_or_else(|| {
                WayfarerError::Configuration(format!(
                    "token lifetime out of range: {}s",
                    self.lifetime_secs
                ))
            })?;

        let claims = Claims::new(user_id, email, issued_at, lifetime)
            .issued_by(&self.issuer, &self.audience);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| WayfarerError::Internal(format!("Failed to generate access token: {e}")))?;

        debug!("Issued access token for user {}", user_id);
        Ok(IssuedToken {
            token,
            expires_in: self.lifetime_secs,
            expires_at,
        })
    }

    /// Verifies a token and returns its claims.
    ///
    /// Bad signatures, malformed payloads, wrong issuer or audience and
    /// elapsed expiry all fail with the same `Unauthenticated` error.
    pub fn verify(&self, token: &str) -> WayfarerResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!(reason = ?e.kind(), "Token verification failed");
                WayfarerError::unauthenticated(INVALID_TOKEN_MESSAGE)
            })
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}
