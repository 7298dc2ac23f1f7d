//! Route table and the layer stack around it.

use crate::{
    controllers::{auth_controller, health_controller, itinerary_controller},
    middleware::{auth_middleware, logging_middleware},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use wayfarer_config::ServerConfig;

/// Full HTTP surface: probes at the root, everything else under `/api`.
///
/// Token decoding wraps only `/api`; the middleware never rejects, so the
/// share route stays reachable without a token.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let api = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/itineraries", itinerary_controller::router())
        .layer(middleware::from_fn_with_state(
            state.token_provider.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Wayfarer API" }))
        .merge(health_controller::router())
        .nest("/api", api)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(cors_layer(server_config))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if server_config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let mut origins = Vec::with_capacity(server_config.cors_origins.len());
    for origin in &server_config.cors_origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => origins.push(value),
            Err(_) => warn!(%origin, "skipping unparsable CORS origin"),
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
