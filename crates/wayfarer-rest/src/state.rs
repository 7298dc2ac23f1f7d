//! Application state for Axum handlers.

use std::sync::Arc;
use wayfarer_core::HealthCheck;
use wayfarer_security::TokenProvider;
use wayfarer_service::{AuthService, ItineraryService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub itinerary_service: Arc<dyn ItineraryService>,
    pub token_provider: Arc<TokenProvider>,
    /// Dependencies probed by the readiness endpoint.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        itinerary_service: Arc<dyn ItineraryService>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            auth_service,
            itinerary_service,
            token_provider,
            health_checks: Vec::new(),
        }
    }

    /// Adds a dependency to the readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("health_checks", &self.health_checks.len())
            .finish_non_exhaustive()
    }
}
