//! Shared helpers for router tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wayfarer_config::{SecurityConfig, ServerConfig};
use wayfarer_repository::{InMemoryItineraryRepository, InMemoryUserRepository};
use wayfarer_rest::{create_router, AppState};
use wayfarer_security::{PasswordHasher, TokenProvider};
use wayfarer_service::{AuthServiceImpl, InMemoryCacheService, ItineraryServiceImpl};

/// Router wired to in-memory stores, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub cache: Arc<InMemoryCacheService>,
    pub itineraries: Arc<InMemoryItineraryRepository>,
    pub security: SecurityConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let security = SecurityConfig::default();
        let token_provider = Arc::new(TokenProvider::new(&security));
        let users = Arc::new(InMemoryUserRepository::new());
        let itineraries = Arc::new(InMemoryItineraryRepository::new());
        let cache = Arc::new(InMemoryCacheService::new());

        let auth_service = Arc::new(AuthServiceImpl::new(
            users,
            Arc::new(PasswordHasher::with_memory_cost(64)),
            token_provider.clone(),
        ));
        let itinerary_service = Arc::new(ItineraryServiceImpl::new(
            itineraries.clone(),
            cache.clone(),
        ));

        let state = AppState::new(auth_service, itinerary_service, token_provider)
            .with_health_check(cache.clone());
        let router = create_router(state, &ServerConfig::default());

        Self {
            router,
            cache,
            itineraries,
            security,
        }
    }

    /// Sends a request and returns the status and parsed JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Signs up a fresh account and returns its token.
    pub async fn signup(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/signup",
                None,
                Some(json!({"email": email, "password": "correct horse"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates an itinerary and returns the response body.
    pub async fn create_itinerary(&self, token: &str, payload: Value) -> Value {
        let (status, body) = self
            .send(Method::POST, "/api/itineraries", Some(token), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body
    }
}

pub fn paris() -> Value {
    json!({
        "title": "Trip to Paris",
        "destination": "Paris",
        "startDate": "2025-11-01",
        "endDate": "2025-11-05",
        "activities": [
            {"time": "09:00", "description": "Louvre", "location": "Rue de Rivoli"}
        ]
    })
}
