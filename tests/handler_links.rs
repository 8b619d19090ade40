mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

async fn shorten(server: &TestServer, token: &str, body: Value) -> axum_test::TestResponse {
    server
        .post("/urls")
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&body)
        .await
}

#[tokio::test]
async fn test_shorten_success() {
    let server = common::make_server();
    let token = common::register_and_login(&server, "alice").await;

    let response = shorten(&server, &token, json!({ "originalUrl": "https://example.com" })).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["originalUrl"], "https://example.com");
    assert_eq!(
        body["shortUrl"],
        format!("{}/{}", common::BASE_URL, code)
    );
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_shorten_requires_session() {
    let server = common::make_server();

    let response = server
        .post("/urls")
        .json(&json!({ "originalUrl": "https://example.com" }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let server = common::make_server();
    let token = common::register_and_login(&server, "alice").await;

    for url in ["not a url", "ftp://example.com/file", "javascript:alert(1)", ""] {
        let response = shorten(&server, &token, json!({ "originalUrl": url })).await;
        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_shorten_same_url_twice_returns_existing() {
    let server = common::make_server();
    let token = common::register_and_login(&server, "alice").await;

    let first = shorten(&server, &token, json!({ "originalUrl": "https://example.com" })).await;
    let second = shorten(&server, &token, json!({ "originalUrl": "https://example.com" })).await;

    first.assert_status(StatusCode::CREATED);
    second.assert_status_ok();

    let a: Value = first.json();
    let b: Value = second.json();
    assert_eq!(a["code"], b["code"]);
}

#[tokio::test]
async fn test_same_url_different_owners_get_distinct_codes() {
    let server = common::make_server();
    let alice = common::register_and_login(&server, "alice").await;
    let bob = common::register_and_login(&server, "bob").await;

    let a: Value = shorten(&server, &alice, json!({ "originalUrl": "https://example.com" }))
        .await
        .json();
    let b: Value = shorten(&server, &bob, json!({ "originalUrl": "https://example.com" }))
        .await
        .json();

    assert_ne!(a["code"], b["code"]);
}

#[tokio::test]
async fn test_shorten_with_custom_code() {
    let server = common::make_server();
    let token = common::register_and_login(&server, "alice").await;

    let response = shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com/docs", "custom_code": "my-docs" }),
    )
    .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["code"], "my-docs");
}

#[tokio::test]
async fn test_custom_code_conflict_and_reserved() {
    let server = common::make_server();
    let token = common::register_and_login(&server, "alice").await;

    shorten(
        &server,
        &token,
        json!({ "originalUrl": "https://a.example.com", "customCode": "taken" }),
    )
    .await
    .assert_status(StatusCode::CREATED);

    let conflict = shorten(
        &server,
        &token,
        json!({ "originalUrl": "https://b.example.com", "customCode": "taken" }),
    )
    .await;
    conflict.assert_status(StatusCode::CONFLICT);

    let reserved = shorten(
        &server,
        &token,
        json!({ "originalUrl": "https://c.example.com", "customCode": "health" }),
    )
    .await;
    reserved.assert_status_bad_request();
}

#[tokio::test]
async fn test_list_returns_only_own_links_newest_first() {
    let server = common::make_server();
    let alice = common::register_and_login(&server, "alice").await;
    let bob = common::register_and_login(&server, "bob").await;

    shorten(&server, &alice, json!({ "originalUrl": "https://one.example.com" })).await;
    shorten(&server, &bob, json!({ "originalUrl": "https://bob.example.com" })).await;
    shorten(&server, &alice, json!({ "originalUrl": "https://two.example.com" })).await;

    let response = server
        .get("/urls")
        .add_header("Authorization", format!("Bearer {alice}"))
        .await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    let urls: Vec<&str> = body
        .iter()
        .map(|l| l["originalUrl"].as_str().unwrap())
        .collect();
    assert_eq!(urls, vec!["https://two.example.com", "https://one.example.com"]);
    assert_eq!(body[0]["visitCount"], 0);
    assert!(body[0]["id"].is_i64());
}

#[tokio::test]
async fn test_list_requires_session() {
    let server = common::make_server();

    server.get("/urls").await.assert_status_unauthorized();
}

#[tokio::test]
async fn test_shorten_rejects_control_characters() {
    let server = common::make_server();
    let token = common::register_and_login(&server, "alice").await;

    for url in ["https://exa\nmple.com/x", "https://example.com/a\u{1}b"] {
        let response = shorten(&server, &token, json!({ "originalUrl": url })).await;
        response.assert_status_bad_request();
    }

    let links: Vec<Value> = server
        .get("/urls")
        .add_header("Authorization", format!("Bearer {token}"))
        .await
        .json();
    assert!(links.is_empty());
}

#[tokio::test]
async fn test_shorten_too_long_url_reports_length() {
    let server = common::make_server();
    let token = common::register_and_login(&server, "alice").await;
    let url = format!("https://example.com/{}", "a".repeat(2048));

    let response = shorten(&server, &token, json!({ "originalUrl": url })).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(
        body["error"]["details"]["reason"]
            .as_str()
            .unwrap()
            .contains("at most 2048 characters")
    );
}
