//! End-to-end API tests.
//!
//! Each test builds the full router over a fresh in-memory database and
//! drives it in-process, so the suite needs no running server and no
//! external state.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

use rolodex_core::UserId;
use rolodex_server::config::ServerConfig;
use rolodex_server::db::{self, SessionRepository};
use rolodex_server::middleware::API_TOKEN_HEADER;
use rolodex_server::routes;
use rolodex_server::state::AppState;

const PASSWORD: &str = "correct horse battery";

/// Build the API router over a fresh in-memory database.
async fn test_app() -> (Router, SqlitePool) {
    let pool = db::create_memory_pool()
        .await
        .expect("in-memory pool should initialize");
    let config = ServerConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: [127, 0, 0, 1].into(),
        port: 0,
        session_ttl: Duration::hours(1),
    };
    let app = routes::routes().with_state(AppState::new(config, pool.clone()));

    (app, pool)
}

/// Send one request and return the status plus the decoded JSON body.
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(API_TOKEN_HEADER, token);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should not fail");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body should be JSON")
    };

    (status, json)
}

/// Register an account and log it in, returning the session token.
async fn register_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"username": username, "password": PASSWORD, "name": username})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": username, "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["data"]["token"].as_str().unwrap().to_owned()
}

/// Create a contact and return its id.
async fn create_contact(app: &Router, token: &str, first_name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/contacts",
        Some(token),
        Some(json!({"firstName": first_name})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["data"]["id"].as_str().unwrap().to_owned()
}

// ============================================================================
// Registration & Login
// ============================================================================

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let (app, _pool) = test_app().await;

    let request = json!({"username": "eko", "password": PASSWORD, "name": "Eko"});
    let (status, body) = send(&app, Method::POST, "/api/users", None, Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "OK");

    let (status, body) = send(&app, Method::POST, "/api/users", None, Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], "Username already registered");
}

#[tokio::test]
async fn test_register_rejects_blank_fields() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"username": "", "password": "short", "name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["username"].is_array());
    assert!(body["errors"]["password"].is_array());
    assert!(body["errors"]["name"].is_array());
}

#[tokio::test]
async fn test_login_token_is_accepted_and_expires_in_the_future() {
    let (app, _pool) = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"username": "eko", "password": PASSWORD, "name": "Eko"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "eko", "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["data"]["token"].as_str().unwrap();
    let expired_at = body["data"]["expiredAt"].as_i64().unwrap();
    assert!(expired_at > Utc::now().timestamp_millis());

    let (status, body) = send(&app, Method::GET, "/api/users/current", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "eko");
    assert_eq!(body["data"]["name"], "Eko");
}

#[tokio::test]
async fn test_login_failure_is_uniform_for_bad_password_and_unknown_user() {
    let (app, _pool) = test_app().await;
    register_and_login(&app, "eko").await;

    let (wrong_status, wrong_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "eko", "password": "not the password"})),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "nobody", "password": PASSWORD})),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["errors"], "Username or password wrong");
}

#[tokio::test]
async fn test_logout_invalidates_only_the_presented_session() {
    let (app, _pool) = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"username": "eko", "password": PASSWORD, "name": "Eko"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let login = json!({"username": "eko", "password": PASSWORD});
    let (_, first) = send(&app, Method::POST, "/api/auth/login", None, Some(login.clone())).await;
    let (_, second) = send(&app, Method::POST, "/api/auth/login", None, Some(login)).await;
    let first = first["data"]["token"].as_str().unwrap().to_owned();
    let second = second["data"]["token"].as_str().unwrap().to_owned();
    assert_ne!(first, second);

    let (status, body) = send(&app, Method::DELETE, "/api/auth/logout", Some(&first), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "OK");

    let (status, _) = send(&app, Method::GET, "/api/users/current", Some(&first), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::GET, "/api/users/current", Some(&second), None).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Malformed requests
// ============================================================================

#[tokio::test]
async fn test_malformed_json_body_answers_in_the_envelope() {
    let (app, _pool) = test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["errors"].is_string());
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_malformed_query_string_answers_in_the_envelope() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/contacts?page=one",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"].is_string());
}

// ============================================================================
// Authentication guard
// ============================================================================

#[tokio::test]
async fn test_protected_routes_reject_missing_and_unknown_tokens() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/contacts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errors"], "Unauthorized");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/users/current",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errors"], "Unauthorized");
}

#[tokio::test]
async fn test_expired_session_is_rejected_and_removed() {
    let (app, pool) = test_app().await;
    register_and_login(&app, "eko").await;

    let user_id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?")
        .bind("eko")
        .fetch_one(&pool)
        .await
        .unwrap();

    let sessions = SessionRepository::new(&pool);
    sessions
        .create("stale-token", UserId::new(user_id), Utc::now() - Duration::hours(1))
        .await
        .unwrap();

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/users/current",
        Some("stale-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The expired row is deleted on first sight.
    assert!(sessions.get("stale-token").await.unwrap().is_none());
}

#[tokio::test]
async fn test_sweep_removes_expired_sessions_and_spares_live_ones() {
    let (app, pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;

    let user_id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = ?")
        .bind("eko")
        .fetch_one(&pool)
        .await
        .unwrap();

    let sessions = SessionRepository::new(&pool);
    sessions
        .create("old-1", UserId::new(user_id), Utc::now() - Duration::hours(2))
        .await
        .unwrap();
    sessions
        .create("old-2", UserId::new(user_id), Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    let removed = sessions.delete_expired(Utc::now()).await.unwrap();
    assert_eq!(removed, 2);

    // The live session still authenticates after the sweep.
    let (status, _) = send(&app, Method::GET, "/api/users/current", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

// ============================================================================
// Contacts
// ============================================================================

#[tokio::test]
async fn test_contact_round_trip() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(&token),
        Some(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "phone": "+44123456"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/contacts/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["firstName"], "Ada");
    assert_eq!(body["data"]["lastName"], "Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["phone"], "+44123456");
}

#[tokio::test]
async fn test_contact_update_keeps_absent_optional_fields() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(&token),
        Some(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com"
        })),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_owned();

    // Only the required field is sent; the stored optionals survive.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/contacts/{id}"),
        Some(&token),
        Some(json!({"firstName": "Augusta"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["firstName"], "Augusta");
    assert_eq!(body["data"]["lastName"], "Lovelace");
    assert_eq!(body["data"]["email"], "ada@example.com");

    // A provided optional field replaces the stored value.
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/contacts/{id}"),
        Some(&token),
        Some(json!({"firstName": "Augusta", "lastName": "King"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lastName"], "King");
}

#[tokio::test]
async fn test_contact_rejects_malformed_email() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/contacts",
        Some(&token),
        Some(json!({"firstName": "Ada", "email": "not-an-email"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["email"].is_array());
}

#[tokio::test]
async fn test_contacts_are_invisible_across_users() {
    let (app, _pool) = test_app().await;
    let alice = register_and_login(&app, "alice").await;
    let mallory = register_and_login(&app, "mallory").await;

    let id = create_contact(&app, &alice, "Ada").await;
    let uri = format!("/api/contacts/{id}");

    let (status, body) = send(&app, Method::GET, &uri, Some(&mallory), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Contact is not found");

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&mallory),
        Some(json!({"firstName": "Hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&mallory), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The owner still sees the untouched contact.
    let (status, body) = send(&app, Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["firstName"], "Ada");
}

#[tokio::test]
async fn test_contact_delete_removes_it_and_repeats_as_not_found() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;
    let id = create_contact(&app, &token, "Ada").await;
    let uri = format!("/api/contacts/{id}");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "OK");

    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Search & Pagination
// ============================================================================

#[tokio::test]
async fn test_search_filters_by_name_and_paginates() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;

    for i in 0..12 {
        create_contact(&app, &token, &format!("Alice{i}")).await;
    }
    for i in 0..3 {
        create_contact(&app, &token, &format!("Bob{i}")).await;
    }

    // Case-insensitive substring filter; 12 matches over 3 pages of 5.
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/contacts?name=ALI&size=5",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["paging"]["currentPage"], 0);
    assert_eq!(body["paging"]["totalPage"], 3);
    assert_eq!(body["paging"]["size"], 5);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/contacts?name=ALI&size=5&page=2",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["paging"]["currentPage"], 2);
}

#[tokio::test]
async fn test_search_with_no_match_reports_zero_pages() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;
    create_contact(&app, &token, "Ada").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/contacts?name=zzz",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["paging"]["totalPage"], 0);
}

#[tokio::test]
async fn test_search_treats_like_wildcards_as_literals() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;
    create_contact(&app, &token, "Ada").await;
    create_contact(&app, &token, "100%").await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/contacts?name=%25",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["firstName"], "100%");
}

// ============================================================================
// Addresses
// ============================================================================

#[tokio::test]
async fn test_address_round_trip_under_a_contact() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;
    let contact_id = create_contact(&app, &token, "Ada").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/contacts/{contact_id}/addresses"),
        Some(&token),
        Some(json!({
            "street": "12 St James's Square",
            "city": "London",
            "country": "United Kingdom",
            "postalCode": "SW1Y 4JH"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let address_id = body["data"]["id"].as_str().unwrap().to_owned();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/contacts/{contact_id}/addresses/{address_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["street"], "12 St James's Square");
    assert_eq!(body["data"]["country"], "United Kingdom");
    assert_eq!(body["data"]["postalCode"], "SW1Y 4JH");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/contacts/{contact_id}/addresses"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_address_delete_twice_is_not_found() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;
    let contact_id = create_contact(&app, &token, "Ada").await;

    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/api/contacts/{contact_id}/addresses"),
        Some(&token),
        Some(json!({"country": "Indonesia"})),
    )
    .await;
    let address_id = body["data"]["id"].as_str().unwrap().to_owned();
    let uri = format!("/api/contacts/{contact_id}/addresses/{address_id}");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "OK");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Address is not found");
}

#[tokio::test]
async fn test_address_routes_resolve_the_contact_under_the_caller() {
    let (app, _pool) = test_app().await;
    let alice = register_and_login(&app, "alice").await;
    let mallory = register_and_login(&app, "mallory").await;
    let contact_id = create_contact(&app, &alice, "Ada").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/contacts/{contact_id}/addresses"),
        Some(&mallory),
        Some(json!({"country": "Indonesia"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errors"], "Contact is not found");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/contacts/{contact_id}/addresses"),
        Some(&mallory),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_a_contact_cascades_to_its_addresses() {
    let (app, pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;
    let contact_id = create_contact(&app, &token, "Ada").await;

    let (_, body) = send(
        &app,
        Method::POST,
        &format!("/api/contacts/{contact_id}/addresses"),
        Some(&token),
        Some(json!({"country": "Indonesia"})),
    )
    .await;
    assert_eq!(body["data"]["country"], "Indonesia");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/contacts/{contact_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let remaining = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM addresses WHERE contact_id = ?",
    )
    .bind(&contact_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(remaining, 0);
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_update_changes_name_and_password() {
    let (app, _pool) = test_app().await;
    let token = register_and_login(&app, "eko").await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/users/current",
        Some(&token),
        Some(json!({"name": "Eko Kurniawan"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Eko Kurniawan");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/users/current",
        Some(&token),
        Some(json!({"password": "a brand new password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password no longer logs in, the new one does.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "eko", "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "eko", "password": "a brand new password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
