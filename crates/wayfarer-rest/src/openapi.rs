//! Generated OpenAPI document served under `/api-docs/openapi.json`.

use crate::controllers::{HealthResponse, ReadinessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use wayfarer_core::{Activity, ErrorResponse, FieldError, ItineraryId, ShareHandle, UserId};
use wayfarer_service::{
    AuthResponse, CreateItineraryRequest, ItineraryListResponse, ItineraryResponse, LoginRequest,
    MessageResponse, SharedItineraryResponse, SignupRequest, UpdateItineraryRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wayfarer API",
        version = "1.0.0",
        description = "Travel itinerary planning with public share links"
    ),
    paths(
        crate::controllers::auth_controller::signup,
        crate::controllers::auth_controller::login,
        crate::controllers::itinerary_controller::create_itinerary,
        crate::controllers::itinerary_controller::list_itineraries,
        crate::controllers::itinerary_controller::get_itinerary,
        crate::controllers::itinerary_controller::update_itinerary,
        crate::controllers::itinerary_controller::delete_itinerary,
        crate::controllers::itinerary_controller::get_shared_itinerary,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            ItineraryId,
            ShareHandle,
            Activity,
            ErrorResponse,
            FieldError,
            SignupRequest,
            LoginRequest,
            AuthResponse,
            MessageResponse,
            CreateItineraryRequest,
            UpdateItineraryRequest,
            ItineraryResponse,
            SharedItineraryResponse,
            ItineraryListResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "itineraries", description = "Owner-scoped itinerary management and public sharing"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
