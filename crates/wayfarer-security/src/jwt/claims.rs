//! Payload of a Wayfarer access token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use wayfarer_core::UserId;

/// Identity carried by a bearer token.
///
/// Lives only for the request that presented the token. Times are Unix
/// seconds, as registered JWT claims require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    /// Email at signup time; informational only, `sub` is the identity.
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// Claims for `user_id` valid for `lifetime` from `issued_at`.
    ///
    /// Issuer and audience start empty; see [`Claims::issued_by`].
    #[must_use]
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: user_id,
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            iss: String::new(),
            aud: String::new(),
        }
    }

    #[must_use]
    pub fn issued_by(mut self, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        self.iss = issuer.into();
        self.aud = audience.into();
        self
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.sub
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Seconds between issuance and expiry.
    #[must_use]
    pub const fn lifetime_secs(&self) -> i64 {
        self.exp - self.iat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let user_id = UserId::new();
        let claims = Claims::new(user_id, "a@example.com", Utc::now(), Duration::hours(1))
            .issued_by("wayfarer", "wayfarer-api");

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], user_id.to_string());
        assert_eq!(json["email"], "a@example.com");
        assert_eq!(json["iss"], "wayfarer");
        assert_eq!(json["aud"], "wayfarer-api");
        assert_eq!(claims.lifetime_secs(), 3600);
    }

    #[test]
    fn test_expiry_boundary() {
        let issued_at = Utc::now();
        let claims = Claims::new(UserId::new(), "a@example.com", issued_at, Duration::hours(1));

        assert!(!claims.is_expired_at(issued_at + Duration::minutes(59)));
        assert!(claims.is_expired_at(issued_at + Duration::hours(1)));
    }
}
