mod common;

use axum::{Router, middleware, routing::post};
use axum_test::TestServer;
use serde_json::json;
use shortlink::api::handlers::shorten_handler;
use shortlink::api::middleware::auth;

fn make_server(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .route("/api/url/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(
            ctx.state.clone(),
            auth::layer,
        ))
        .with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_creates_link() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);
    let (_, token) = common::create_account(&ctx, "alice@example.com").await;

    let response = server
        .post("/api/url/shorten")
        .authorization_bearer(&token)
        .json(&json!({ "originalUrl": "https://example.com/a" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["originalUrl"], "https://example.com/a");
    assert_eq!(json["clicks"], 0);
    assert!(json["expiresAt"].is_null());

    let code = json["shortCode"].as_str().unwrap();
    assert_eq!(code.len(), 7);
    assert!(
        code.bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    );
}

#[tokio::test]
async fn test_shorten_deduplicates_per_owner() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);
    let (_, token) = common::create_account(&ctx, "alice@example.com").await;

    let first = server
        .post("/api/url/shorten")
        .authorization_bearer(&token)
        .json(&json!({ "originalUrl": "https://dedup.example.com" }))
        .await;
    first.assert_status(axum::http::StatusCode::CREATED);
    let code = first.json::<serde_json::Value>()["shortCode"]
        .as_str()
        .unwrap()
        .to_string();

    let second = server
        .post("/api/url/shorten")
        .authorization_bearer(&token)
        .json(&json!({ "originalUrl": "https://dedup.example.com" }))
        .await;

    second.assert_status_ok();

    let json = second.json::<serde_json::Value>();
    assert_eq!(json["shortCode"], code.as_str());
    assert_eq!(json["message"], "URL already shortened");

    // No second row was created for the duplicate.
    assert_eq!(ctx.links.count(), 1);
}

#[tokio::test]
async fn test_shorten_same_url_different_owners() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);
    let (_, alice) = common::create_account(&ctx, "alice@example.com").await;
    let (_, bob) = common::create_account(&ctx, "bob@example.com").await;

    let first = server
        .post("/api/url/shorten")
        .authorization_bearer(&alice)
        .json(&json!({ "originalUrl": "https://shared.example.com" }))
        .await;
    first.assert_status(axum::http::StatusCode::CREATED);

    let second = server
        .post("/api/url/shorten")
        .authorization_bearer(&bob)
        .json(&json!({ "originalUrl": "https://shared.example.com" }))
        .await;
    second.assert_status(axum::http::StatusCode::CREATED);

    let code1 = first.json::<serde_json::Value>()["shortCode"]
        .as_str()
        .unwrap()
        .to_string();
    let code2 = second.json::<serde_json::Value>()["shortCode"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(code1, code2);
    assert_eq!(ctx.links.count(), 2);
}

#[tokio::test]
async fn test_shorten_missing_url() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);
    let (_, token) = common::create_account(&ctx, "alice@example.com").await;

    let response = server
        .post("/api/url/shorten")
        .authorization_bearer(&token)
        .json(&json!({}))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Original URL is required");
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);
    let (_, token) = common::create_account(&ctx, "alice@example.com").await;

    let response = server
        .post("/api/url/shorten")
        .authorization_bearer(&token)
        .json(&json!({ "originalUrl": "   " }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_with_expiry() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);
    let (_, token) = common::create_account(&ctx, "alice@example.com").await;

    let response = server
        .post("/api/url/shorten")
        .authorization_bearer(&token)
        .json(&json!({
            "originalUrl": "https://example.com/expiring",
            "expiresAt": "2099-01-01T00:00:00Z"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert!(json["expiresAt"].as_str().unwrap().starts_with("2099-01-01"));
}

#[tokio::test]
async fn test_shorten_requires_token() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);

    let response = server
        .post("/api/url/shorten")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn test_shorten_rejects_bad_token() {
    let ctx = common::create_test_state();
    let server = make_server(&ctx);

    let response = server
        .post("/api/url/shorten")
        .authorization_bearer("not-a-real-token")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
}
