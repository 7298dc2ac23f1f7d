//! Itinerary controller.

use crate::{
    extractors::{parse_itinerary_id, parse_share_handle, AuthenticatedUser, ValidatedJson},
    responses::{created, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::debug;
use wayfarer_core::{ErrorResponse, WayfarerError};
use wayfarer_service::{
    CreateItineraryRequest, ItineraryListResponse, ItineraryResponse, ListItinerariesQuery,
    MessageResponse, SharedItineraryResponse, UpdateItineraryRequest,
};

/// Creates the itinerary router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_itinerary).get(list_itineraries))
        .route("/share/:share_handle", get(get_shared_itinerary))
        .route(
            "/:id",
            get(get_itinerary)
                .put(update_itinerary)
                .delete(delete_itinerary),
        )
}

/// Create an itinerary owned by the caller.
#[utoipa::path(
    post,
    path = "/api/itineraries",
    tag = "itineraries",
    request_body = CreateItineraryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Itinerary created", body = ItineraryResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn create_itinerary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateItineraryRequest>,
) -> Result<(StatusCode, Json<ItineraryResponse>), AppError> {
    debug!("Create itinerary request from {}", user.sub);

    let response = state.itinerary_service.create(&user, request).await?;
    Ok(created(response))
}

/// List the caller's itineraries.
#[utoipa::path(
    get,
    path = "/api/itineraries",
    tag = "itineraries",
    params(ListItinerariesQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "One page of itineraries", body = ItineraryListResponse),
        (status = 400, description = "Unsupported sort field or bad query", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn list_itineraries(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    query: Result<Query<ListItinerariesQuery>, QueryRejection>,
) -> ApiResult<ItineraryListResponse> {
    let Query(query) = query.map_err(|e| WayfarerError::validation(e.body_text()))?;
    debug!("List itineraries request from {}", user.sub);

    let response = state.itinerary_service.list(&user, query).await?;
    ok(response)
}

/// Get one of the caller's itineraries.
#[utoipa::path(
    get,
    path = "/api/itineraries/{id}",
    tag = "itineraries",
    params(("id" = String, Path, description = "Itinerary id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The itinerary", body = ItineraryResponse),
        (status = 403, description = "Caller does not own the itinerary", body = ErrorResponse),
        (status = 404, description = "Itinerary not found", body = ErrorResponse)
    )
)]
pub async fn get_itinerary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ItineraryResponse> {
    debug!("Get itinerary request: {}", id);

    let id = parse_itinerary_id(&id)?;
    let response = state.itinerary_service.get(&user, id).await?;
    ok(response)
}

/// Update one of the caller's itineraries.
#[utoipa::path(
    put,
    path = "/api/itineraries/{id}",
    tag = "itineraries",
    params(("id" = String, Path, description = "Itinerary id")),
    request_body = UpdateItineraryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The updated itinerary", body = ItineraryResponse),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 403, description = "Caller does not own the itinerary", body = ErrorResponse),
        (status = 404, description = "Itinerary not found", body = ErrorResponse)
    )
)]
pub async fn update_itinerary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateItineraryRequest>,
) -> ApiResult<ItineraryResponse> {
    debug!("Update itinerary request: {}", id);

    let id = parse_itinerary_id(&id)?;
    let response = state.itinerary_service.update(&user, id, request).await?;
    ok(response)
}

/// Delete one of the caller's itineraries.
#[utoipa::path(
    delete,
    path = "/api/itineraries/{id}",
    tag = "itineraries",
    params(("id" = String, Path, description = "Itinerary id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Itinerary deleted", body = MessageResponse),
        (status = 403, description = "Caller does not own the itinerary", body = ErrorResponse),
        (status = 404, description = "Itinerary not found", body = ErrorResponse)
    )
)]
pub async fn delete_itinerary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    debug!("Delete itinerary request: {}", id);

    let id = parse_itinerary_id(&id)?;
    let response = state.itinerary_service.delete(&user, id).await?;
    ok(response)
}

/// Public read through a share handle.
#[utoipa::path(
    get,
    path = "/api/itineraries/share/{share_handle}",
    tag = "itineraries",
    params(("share_handle" = String, Path, description = "Public share handle")),
    responses(
        (status = 200, description = "The shared itinerary, without owner", body = SharedItineraryResponse),
        (status = 404, description = "No itinerary has this handle", body = ErrorResponse)
    )
)]
pub async fn get_shared_itinerary(
    State(state): State<AppState>,
    Path(share_handle): Path<String>,
) -> ApiResult<SharedItineraryResponse> {
    debug!("Shared itinerary request: {}", share_handle);

    let handle = parse_share_handle(&share_handle)?;
    let response = state.itinerary_service.get_shared(handle).await?;
    ok(response)
}
