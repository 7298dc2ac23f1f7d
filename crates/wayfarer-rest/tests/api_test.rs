//! End-to-end tests driving the real router over in-memory stores.

mod common;

use axum::http::{Method, StatusCode};
use common::{paris, TestApp};
use serde_json::json;
use wayfarer_config::SecurityConfig;
use wayfarer_core::UserId;
use wayfarer_security::TokenProvider;
use wayfarer_service::cache_keys;

#[tokio::test]
async fn signup_then_login_returns_tokens() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({"email": "ann@example.com", "password": "pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User signup success");
    assert_eq!(body["expiresIn"], 3600);
    assert!(body["token"].is_string());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ann@example.com", "password": "pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn signup_rejects_empty_fields_and_duplicates() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({"email": "", "password": "pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email field is empty");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({"email": "ann@example.com"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password field is empty");

    app.signup("ann@example.com").await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(json!({"email": "ann@example.com", "password": "pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User is already present");
}

#[tokio::test]
async fn login_failures() {
    let app = TestApp::new();
    app.signup("ann@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "bob@example.com", "password": "pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User does not exist");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ann@example.com", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid password");
}

#[tokio::test]
async fn itinerary_routes_require_a_valid_token() {
    let app = TestApp::new();

    let (status, missing) = app.send(Method::GET, "/api/itineraries", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, malformed) = app
        .send(Method::GET, "/api/itineraries", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let foreign = TokenProvider::new(&SecurityConfig {
        jwt_secret: "another-secret-that-is-long-enough-to-pass".to_string(),
        ..SecurityConfig::default()
    })
    .issue(UserId::new(), "eve@example.com")
    .unwrap();
    let (status, forged) = app
        .send(Method::GET, "/api/itineraries", Some(&foreign.token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The caller cannot tell the causes apart.
    assert_eq!(missing, malformed);
    assert_eq!(malformed, forged);
    assert_eq!(forged["message"], "Invalid or expired token");
}

#[tokio::test]
async fn create_then_share_hides_owner_and_blocks_other_users() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;

    let created = app.create_itinerary(&alice, paris()).await;
    let id = created["id"].as_str().unwrap();
    let share = created["shareableId"].as_str().unwrap();
    assert_eq!(created["title"], "Trip to Paris");
    assert!(created["userId"].is_string());

    let (status, _) = app
        .send(Method::GET, &format!("/api/itineraries/{id}"), Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, shared) = app
        .send(Method::GET, &format!("/api/itineraries/share/{share}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shared["id"], id);
    assert!(shared.get("userId").is_none());

    // Share reads never touch the cache.
    assert!(app.cache.is_empty());
}

#[tokio::test]
async fn update_is_visible_after_cached_read() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;
    let created = app.create_itinerary(&alice, paris()).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/itineraries/{id}");

    let (status, first) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["destination"], "Paris");
    assert!(app
        .cache
        .contains_key(&cache_keys::itinerary_by_id(id.parse().unwrap())));

    let (status, updated) = app
        .send(
            Method::PUT,
            &uri,
            Some(&alice),
            Some(json!({"destination": "Lyon", "userId": UserId::new()})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["destination"], "Lyon");
    assert_eq!(updated["userId"], created["userId"]);
    assert_eq!(updated["shareableId"], created["shareableId"]);

    let (status, second) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["destination"], "Lyon");
}

#[tokio::test]
async fn cached_itinerary_is_still_forbidden_to_other_users() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let created = app.create_itinerary(&alice, paris()).await;
    let uri = format!("/api/itineraries/{}", created["id"].as_str().unwrap());

    let (status, _) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.cache.len(), 1);

    let (status, _) = app.send(Method::GET, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn list_pages_through_own_itineraries() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;
    for i in 1..=15 {
        let mut payload = paris();
        payload["title"] = json!(format!("Trip {i:02}"));
        app.create_itinerary(&alice, payload).await;
    }
    app.create_itinerary(&bob, paris()).await;

    let (status, body) = app
        .send(
            Method::GET,
            "/api/itineraries?limit=10&page=2",
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 15);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["itineraries"].as_array().unwrap().len(), 5);

    let (status, body) = app
        .send(
            Method::GET,
            "/api/itineraries?sort=title&destination=Paris",
            Some(&alice),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itineraries"][0]["title"], "Trip 01");

    let (status, _) = app
        .send(Method::GET, "/api/itineraries?sort=userId", Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::GET, "/api/itineraries?page=abc", Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_validates_required_fields() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/itineraries",
            Some(&alice),
            Some(json!({"title": "No dates", "destination": "Rome"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    let mut reversed = paris();
    reversed["endDate"] = json!("2025-10-01");
    let (status, _) = app
        .send(Method::POST, "/api/itineraries", Some(&alice), Some(reversed))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad_date = paris();
    bad_date["startDate"] = json!("first of november");
    let (status, body) = app
        .send(Method::POST, "/api/itineraries", Some(&alice), Some(bad_date))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");

    assert!(app.itineraries.is_empty());
}

#[tokio::test]
async fn delete_removes_itinerary_and_cache_entry() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;
    let bob = app.signup("bob@example.com").await;
    let created = app.create_itinerary(&alice, paris()).await;
    let uri = format!("/api/itineraries/{}", created["id"].as_str().unwrap());
    app.send(Method::GET, &uri, Some(&alice), None).await;

    let (status, _) = app.send(Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Itinerary deleted successfully");
    assert!(app.cache.is_empty());

    let (status, body) = app.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Itinerary not found");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let share = created["shareableId"].as_str().unwrap();
    let (status, _) = app
        .send(Method::GET, &format!("/api/itineraries/share/{share}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_ids() {
    let app = TestApp::new();
    let alice = app.signup("alice@example.com").await;

    let (status, _) = app
        .send(Method::GET, "/api/itineraries/not-a-uuid", Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::GET, "/api/itineraries/share/not-a-uuid", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoints() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = app.send(Method::GET, "/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["cache"], "healthy");

    let (status, _) = app.send(Method::GET, "/health/live", None, None).await;
    assert_eq!(status, StatusCode::OK);
}
