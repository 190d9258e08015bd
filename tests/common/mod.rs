#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use tinylink::prelude::*;

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::with_repository(repository.clone());
    (state, repository)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let (state, repository) = create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();
    (server, repository)
}

pub async fn create_test_link(server: &TestServer, url: &str, code: Option<&str>) -> Value {
    let body = match code {
        Some(code) => json!({ "url": url, "code": code }),
        None => json!({ "url": url }),
    };

    let response = server.post("/api/links").json(&body).await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json::<Value>()
}
