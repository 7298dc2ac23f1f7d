//! Seams shared across layers.

use crate::UserId;
use async_trait::async_trait;
use std::fmt;

/// A resource with exactly one owning account. The ownership gate
/// authorizes anything that implements this.
pub trait Owned {
    fn owner_id(&self) -> UserId;
}

/// A dependency reported by `/health/ready`.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Key under which the result is reported, e.g. `database`.
    fn name(&self) -> &str;

    async fn check(&self) -> HealthStatus;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    /// Working with reduced function, e.g. the cache is switched off.
    Degraded(String),
    Unhealthy(String),
}

impl HealthStatus {
    /// Healthy and degraded components can both take traffic.
    #[must_use]
    pub const fn can_serve(&self) -> bool {
        !matches!(self, Self::Unhealthy(_))
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded(_) => "degraded",
            Self::Unhealthy(_) => "unhealthy",
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Healthy => None,
            Self::Degraded(reason) | Self::Unhealthy(reason) => Some(reason),
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{} ({reason})", self.label()),
            None => f.write_str(self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_still_serves() {
        assert!(HealthStatus::Healthy.can_serve());
        assert!(HealthStatus::Degraded("cache off".into()).can_serve());
        assert!(!HealthStatus::Unhealthy("refused".into()).can_serve());
    }

    #[test]
    fn test_display_includes_reason() {
        assert_eq!(HealthStatus::Healthy.to_string(), "healthy");
        assert_eq!(
            HealthStatus::Unhealthy("connection refused".into()).to_string(),
            "unhealthy (connection refused)"
        );
    }
}
