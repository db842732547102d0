//! End-to-end API tests: the real router, services and migrations over an
//! in-memory SQLite database, with a fixed-table geocoder.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use daily_food::api::{create_router, AppState};
use daily_food::config::Config;
use daily_food::domain::Coordinate;
use daily_food::infra::{Database, Geocoder};

const SECRET: &str = "integration-test-secret-key-of-32+chars";

/// Geocoder answering from a fixed address table
struct TableGeocoder(HashMap<&'static str, Coordinate>);

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn locate(&self, address: &str) -> Option<Coordinate> {
        self.0.get(address).copied()
    }
}

async fn app() -> Router {
    let geocoder = TableGeocoder(HashMap::from([(
        "No. 300, Zhongda Rd., Zhongli Dist.",
        Coordinate::new(24.94112, 121.21438),
    )]));
    let database = Database::connect_url("sqlite::memory:").await.unwrap();

    create_router(AppState::from_config(
        Arc::new(database),
        Arc::new(geocoder),
        Config::for_testing(SECRET),
    ))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Register `username` and return a bearer token for it
async fn sign_up(app: &Router, username: &str) -> String {
    let (status, _) = call(
        app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "SecurePass123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password=SecurePass123",
            username
        )))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

async fn create_restaurant(app: &Router, token: &str, body: Value) -> i64 {
    let (status, body) = call(app, Method::POST, "/api/v1/restaurants", Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app().await;

    let (status, body) = call(&app, Method::GET, "/api/v1/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_twice_conflicts() {
    let app = app().await;
    sign_up(&app, "andy").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({
            "username": "andy",
            "email": "other@example.com",
            "password": "SecurePass123",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_validates_payload() {
    let app = app().await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({"username": "andy", "email": "not-an-email", "password": "short"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;

    let (status, body) = call(&app, Method::GET, "/api/v1/users/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "andy");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = app().await;
    sign_up(&app, "andy").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=andy&password=WrongPass123"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_restaurant_saves_it_for_the_creator() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;

    let id = create_restaurant(
        &app,
        &token,
        json!({"name": "Din Tai Fung", "address": "Zhongli", "lat": 24.94093, "lng": 121.21433}),
    )
    .await;

    let (status, body) = call(&app, Method::GET, "/api/v1/users/me/restaurants", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], id);

    let (status, body) = call(&app, Method::GET, &format!("/api/v1/restaurants/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Din Tai Fung");
    assert_eq!(body["open_times"], json!([]));
}

#[tokio::test]
async fn test_create_restaurant_geocodes_address() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;

    let id = create_restaurant(
        &app,
        &token,
        json!({"name": "Noodle Bar", "address": "No. 300, Zhongda Rd., Zhongli Dist.", "lat": 10.0}),
    )
    .await;

    let (_, body) = call(&app, Method::GET, &format!("/api/v1/restaurants/{}", id), None, None).await;
    assert_eq!(body["lat"], 24.94112);
    assert_eq!(body["lng"], 121.21438);
}

#[tokio::test]
async fn test_create_restaurant_with_unknown_address_writes_nothing() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/restaurants",
        Some(&token),
        Some(json!({"name": "Ghost Kitchen", "address": "Nowhere"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, Method::GET, "/api/v1/restaurants", None, None).await;
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn test_random_pick_respects_radius_and_limit() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;
    for (name, lat, lng) in [
        ("near-a", 24.94093, 121.21433),
        ("near-b", 24.94057, 121.21526),
        ("far", 25.04174, 121.07653),
    ] {
        create_restaurant(&app, &token, json!({"name": name, "address": name, "lat": lat, "lng": lng})).await;
    }

    let (status, body) = call(
        &app,
        Method::GET,
        "/api/v1/restaurants/random?lat=24.94097&lng=121.21456&distance=0.5&limit=10",
        None,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let picked = body.as_array().unwrap();
    assert_eq!(picked.len(), 2);
    assert!(picked.iter().all(|r| r["name"] != "far" && r["is_open"] == true));

    let (_, body) = call(
        &app,
        Method::GET,
        "/api/v1/restaurants/random?lat=24.94097&lng=121.21456&distance=0.5",
        None,
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_random_pick_with_opening_hours() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;
    let id = create_restaurant(
        &app,
        &token,
        json!({"name": "Lunch Box", "address": "Zhongli", "lat": 24.94093, "lng": 121.21433}),
    )
    .await;

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/v1/restaurants/{}/open-times", id),
        Some(&token),
        Some(json!({"open_times": [
            {"day_of_week": 3, "open_time": "12:00", "close_time": "20:30"},
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body[0]["open_time"], "12:00");

    let pick = |day: u8, time: &str| {
        format!(
            "/api/v1/restaurants/random?lat=24.94097&lng=121.21456&distance=0.5&day_of_week={}&current_time={}",
            day, time
        )
    };

    let (_, body) = call(&app, Method::GET, &pick(3, "20:30"), None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = call(&app, Method::GET, &pick(3, "11:59"), None, None).await;
    assert_eq!(body, json!([]));

    let (_, body) = call(&app, Method::GET, &pick(4, "15:00"), None, None).await;
    assert_eq!(body, json!([]));

    // Day without time falls back to the distance filter alone
    let (_, body) = call(
        &app,
        Method::GET,
        "/api/v1/restaurants/random?lat=24.94097&lng=121.21456&distance=0.5&day_of_week=4",
        None,
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_time_day_is_stored_unchecked() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;
    let id = create_restaurant(
        &app,
        &token,
        json!({"name": "Night Market", "address": "Zhongli", "lat": 24.9, "lng": 121.2}),
    )
    .await;

    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/v1/restaurants/{}/open-times", id),
        Some(&token),
        Some(json!({"open_times": [
            {"day_of_week": 0, "open_time": "17:00", "close_time": "23:00"},
            {"day_of_week": 8, "open_time": "17:00", "close_time": "23:00"},
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body[0]["day_of_week"], 0);
    assert_eq!(body[1]["day_of_week"], 8);
}

#[tokio::test]
async fn test_open_time_batch_with_bad_entry_is_rejected() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;
    let id = create_restaurant(
        &app,
        &token,
        json!({"name": "Night Market", "address": "Zhongli", "lat": 24.9, "lng": 121.2}),
    )
    .await;
    let uri = format!("/api/v1/restaurants/{}/open-times", id);

    let (status, _) = call(
        &app,
        Method::POST,
        &uri,
        Some(&token),
        Some(json!({"open_times": [
            {"day_of_week": 5, "open_time": "17:00", "close_time": "23:00"},
            {"day_of_week": 6, "open_time": "17:00", "close_time": "late"},
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_only_savers_may_modify_a_restaurant() {
    let app = app().await;
    let owner = sign_up(&app, "owner").await;
    let stranger = sign_up(&app, "stranger").await;
    let id = create_restaurant(
        &app,
        &owner,
        json!({"name": "Hot Pot", "address": "Zhongli", "lat": 24.9, "lng": 121.2}),
    )
    .await;
    let uri = format!("/api/v1/restaurants/{}", id);

    let (status, _) = call(&app, Method::PATCH, &uri, Some(&stranger), Some(json!({"price": 3}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, Method::DELETE, &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(&app, Method::DELETE, "/api/v1/restaurants/999", Some(&stranger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, Method::PATCH, &uri, Some(&owner), Some(json!({"price": 3}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 3);
    assert_eq!(body["name"], "Hot Pot");

    // Saving grants the same rights
    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/users/me/restaurants/{}", id),
        Some(&stranger),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::DELETE, &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_open_time_update_and_delete() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;
    let id = create_restaurant(
        &app,
        &token,
        json!({"name": "Breakfast", "address": "Zhongli", "lat": 24.9, "lng": 121.2}),
    )
    .await;
    let (_, created) = call(
        &app,
        Method::POST,
        &format!("/api/v1/restaurants/{}/open-times", id),
        Some(&token),
        Some(json!({"open_times": [{"day_of_week": 1, "open_time": "06:00", "close_time": "11:00"}]})),
    )
    .await;
    let entry = format!("/api/v1/open-times/{}", created[0]["id"]);

    let (status, body) = call(&app, Method::PATCH, &entry, Some(&token), Some(json!({"close_time": "12:30"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["open_time"], "06:00");
    assert_eq!(body["close_time"], "12:30");

    let (status, _) = call(&app, Method::DELETE, &entry, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, &format!("/api/v1/restaurants/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_restaurant_types_and_tags() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;
    let id = create_restaurant(
        &app,
        &token,
        json!({"name": "Beef Noodles", "address": "Zhongli", "lat": 24.9, "lng": 121.2}),
    )
    .await;

    let (status, kind) = call(
        &app,
        Method::POST,
        "/api/v1/restaurant-types",
        Some(&token),
        Some(json!({"name": "noodles"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/restaurant-types",
        Some(&token),
        Some(json!({"name": "noodles"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let tag = format!("/api/v1/restaurants/{}/types/{}", id, kind["id"]);
    let (status, _) = call(&app, Method::PUT, &tag, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, detail) = call(&app, Method::GET, &format!("/api/v1/restaurants/{}", id), None, None).await;
    assert_eq!(detail["types"][0]["name"], "noodles");

    let (status, _) = call(&app, Method::DELETE, &tag, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, types) = call(&app, Method::GET, "/api/v1/restaurant-types", None, None).await;
    assert_eq!(types.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleted_account_token_stops_working() {
    let app = app().await;
    let token = sign_up(&app, "andy").await;

    let (status, _) = call(&app, Method::DELETE, "/api/v1/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::GET, "/api/v1/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
