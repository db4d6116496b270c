use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use tamubook::config::Config;

/// Credentials seeded by the initial migration.
const SEED_USERNAME: &str = "admin";
const SEED_PASSWORD: &str = "password";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();

    let state = tamubook::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    tamubook::api::router(state)
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = if let Some(body) = body {
        builder
            .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
            .body(Body::from(body.to_string()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send_json(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = login(app, SEED_USERNAME, SEED_PASSWORD).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_protected_routes_require_access_token() {
    let app = spawn_app().await;

    let (status, _) = send_json(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(&app, Method::GET, "/api/users", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = admin_token(&app).await;
    let (status, body) = send_json(&app, Method::GET, "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let app = spawn_app().await;

    let (status, wrong_password) = login(&app, SEED_USERNAME, "not-the-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = login(&app, "nobody", SEED_PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Same message whether the username or the password was wrong.
    assert_eq!(wrong_password["error"], unknown_user["error"]);
}

#[tokio::test]
async fn test_refresh_and_logout_flow() {
    let app = spawn_app().await;

    let (status, body) = login(&app, SEED_USERNAME, SEED_PASSWORD).await;
    assert_eq!(status, StatusCode::CREATED);
    let refresh_token = body["data"]["refresh_token"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": refresh_token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["access_token"].is_string());

    let (status, _) = send_json(
        &app,
        Method::DELETE,
        "/api/auth/logout",
        None,
        Some(json!({ "refresh_token": refresh_token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Revoked: the signature still verifies but the persisted row is gone.
    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/api/auth/refresh",
        None,
        Some(json!({ "refresh_token": refresh_token })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::DELETE,
        "/api/auth/logout",
        None,
        Some(json!({ "refresh_token": refresh_token })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_crud_happy_path() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "A",
            "position": "staff",
            "username": "a1",
            "password": "p"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["data"]["user_id"].as_str().unwrap().to_string();
    assert!(user_id.starts_with("user-"));
    assert!(body["data"]["log_id"].as_str().unwrap().starts_with("log-"));

    let (status, body) = send_json(
        &app,
        Method::GET,
        "/api/users?page=1&limit=10",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let usernames: Vec<&str> = body["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["username"].as_str())
        .collect();
    assert!(usernames.contains(&"a1"));

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/api/users/{user_id}"),
        Some(&token),
        Some(json!({
            "name": "A Renamed",
            "position": "front desk",
            "username": "a1",
            "password": "p2"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], user_id);

    let (status, _) = login(&app, "a1", "p2").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_json(
        &app,
        Method::DELETE,
        &format!("/api/users/{user_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], user_id);

    let (status, body) = send_json(&app, Method::GET, "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let usernames: Vec<&str> = body["data"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["username"].as_str())
        .collect();
    assert!(!usernames.contains(&"a1"));
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let payload = json!({
        "name": "A",
        "position": "staff",
        "username": "a1",
        "password": "p"
    });

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        send_json(&app, Method::POST, "/api/users", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_staff_cannot_manage_users() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "Staffer",
            "position": "front desk",
            "username": "staffer",
            "password": "secret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = login(&app, "staffer", "secret").await;
    assert_eq!(status, StatusCode::CREATED);
    let staff_token = body["data"]["access_token"].as_str().unwrap().to_string();

    // Listing is allowed for any authenticated user.
    let (status, _) = send_json(&app, Method::GET, "/api/users", Some(&staff_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Mutations are not.
    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(&staff_token),
        Some(json!({
            "name": "B",
            "position": "staff",
            "username": "b1",
            "password": "p"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send_json(
        &app,
        Method::GET,
        "/api/activity",
        Some(&staff_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_payloads_are_rejected() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "",
            "position": "staff",
            "username": "a1",
            "password": "p"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "A",
            "position": "staff",
            "username": "a1",
            "password": "p",
            "role": "root"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::GET,
        "/api/users?page=0",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activity_log_records_mutations() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({
            "name": "A",
            "position": "staff",
            "username": "a1",
            "password": "p"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = body["data"]["user_id"].as_str().unwrap().to_string();

    let (status, body) = send_json(&app, Method::GET, "/api/activity", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body["data"]["data"].as_array().unwrap();
    assert!(
        entries
            .iter()
            .any(|e| e["action"] == "create" && e["target_id"] == user_id.as_str())
    );
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = spawn_app().await;

    let (status, body) = send_json(&app, Method::GET, "/api/health/live", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send_json(&app, Method::GET, "/api/health/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["database"], true);
}
