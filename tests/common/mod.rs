#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use snaplink::application::services::{AuthService, LinkService};
use snaplink::infrastructure::memory::{MemoryLinkRepository, MemoryUserRepository};
use snaplink::routes::{RouterOptions, build_router};
use snaplink::state::AppState;
use snaplink::utils::jwt::TokenSigner;
use std::sync::Arc;

pub const TEST_SECRET: &[u8] = b"test-secret-test-secret-test-secret!";
pub const BASE_URL: &str = "http://localhost:3000";

pub fn test_signer() -> TokenSigner {
    TokenSigner::new(TEST_SECRET, chrono::Duration::hours(24))
}

/// State backed by empty in-memory repositories.
pub fn create_test_state() -> AppState {
    let users = Arc::new(MemoryUserRepository::new());
    let links = Arc::new(MemoryLinkRepository::new());

    AppState::new(
        AuthService::new(users, test_signer()),
        LinkService::new(links, BASE_URL),
        false,
    )
}

/// Full router without rate limiting; the test transport has no peer address.
pub fn make_server() -> TestServer {
    let app = build_router(
        create_test_state(),
        RouterOptions {
            behind_proxy: false,
            rate_limit: false,
        },
    );
    TestServer::new(app).unwrap()
}

pub async fn register(server: &TestServer, username: &str, email: &str, password: &str) -> Value {
    let response = server
        .post("/auth/register")
        .json(&json!({ "username": username, "email": email, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

/// Registers `username` and returns a bearer token for it.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    let email = format!("{username}@example.com");
    register(server, username, &email, "secret1").await;

    let response = server
        .post("/auth/login")
        .json(&json!({ "identifier": username, "password": "secret1" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["accessToken"].as_str().unwrap().to_string()
}
