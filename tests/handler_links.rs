mod common;

use serde_json::{Value, json};
use tinylink::prelude::*;

#[tokio::test]
async fn test_create_link_with_generated_code() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body = response.json::<Value>();
    let code = body["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["url"], "https://example.com");
    assert_eq!(body["clicks"], 0);
    assert!(body["created_at"].is_string());
    assert!(body["last_clicked"].is_null());
}

#[tokio::test]
async fn test_create_link_keeps_explicit_scheme() {
    let (server, _repo) = common::create_test_server();

    let body = common::create_test_link(&server, "http://example.com/a?b=c", None).await;

    assert_eq!(body["url"], "http://example.com/a?b=c");
}

#[tokio::test]
async fn test_create_link_with_custom_code() {
    let (server, _repo) = common::create_test_server();

    let body = common::create_test_link(&server, "https://docs.rs", Some("docs123")).await;

    assert_eq!(body["code"], "docs123");
    assert_eq!(body["url"], "https://docs.rs");
}

#[tokio::test]
async fn test_create_link_empty_code_generates_one() {
    let (server, _repo) = common::create_test_server();

    let body = common::create_test_link(&server, "example.com", Some("")).await;

    assert_eq!(body["code"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_create_link_duplicate_code() {
    let (server, _repo) = common::create_test_server();
    common::create_test_link(&server, "https://a.example.com", Some("taken1")).await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://b.example.com", "code": "taken1" }))
        .await;

    assert_eq!(response.status_code(), 409);
    assert_eq!(response.json::<Value>()["error"], "Code already exists");
}

#[tokio::test]
async fn test_create_link_code_length_bounds() {
    let (server, _repo) = common::create_test_server();

    for code in ["abc", "abcde", "abcdefghi", "abc-123", "abc 123"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": "example.com", "code": code }))
            .await;

        assert_eq!(response.status_code(), 400, "code {code:?}");
    }

    common::create_test_link(&server, "example.com", Some("abcdef1")).await;
    common::create_test_link(&server, "example.com", Some("abcdefgh")).await;
}

#[tokio::test]
async fn test_create_link_reserved_code() {
    let (server, _repo) = common::create_test_server();

    for code in ["healthz", "apiLinks", "api1234"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": "example.com", "code": code }))
            .await;

        assert_eq!(response.status_code(), 400, "code {code:?}");
        assert_eq!(response.json::<Value>()["error"], "This code is reserved");
    }
}

#[tokio::test]
async fn test_create_link_invalid_urls() {
    let (server, repo) = common::create_test_server();

    for url in [
        "",
        "   ",
        "https",
        "http:",
        "not a url",
        "localhost",
        "ftp://example.com",
        "https://localhost/x",
    ] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": url }))
            .await;

        assert_eq!(response.status_code(), 400, "url {url:?}");
        assert_eq!(response.json::<Value>()["error"], "Invalid URL");
    }

    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_create_link_missing_url() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "code": "docs123" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_create_link_non_string_url() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": 42 }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_create_link_malformed_body() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_create_link_self_redirect() {
    let (server, repo) = common::create_test_server();

    for url in ["https://sho.rt/abc123", "http://SHO.RT", "sho.rt/abc123"] {
        let response = server
            .post("/api/links")
            .add_header("Host", "sho.rt")
            .json(&json!({ "url": url }))
            .await;

        assert_eq!(response.status_code(), 400, "url {url:?}");
    }

    assert!(repo.is_empty());

    let response = server
        .post("/api/links")
        .add_header("Host", "sho.rt:3000")
        .json(&json!({ "url": "https://other.example.com" }))
        .await;

    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn test_list_links_newest_first() {
    let (server, _repo) = common::create_test_server();
    common::create_test_link(&server, "https://first.example.com", Some("first01")).await;
    common::create_test_link(&server, "https://second.example.com", Some("second1")).await;
    common::create_test_link(&server, "https://third.example.com", Some("third01")).await;

    let response = server.get("/api/links").await;

    assert_eq!(response.status_code(), 200);
    let links = response.json::<Vec<Value>>();
    let codes: Vec<&str> = links.iter().map(|l| l["code"].as_str().unwrap()).collect();
    assert_eq!(codes, vec!["third01", "second1", "first01"]);
}

#[tokio::test]
async fn test_list_links_empty() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/links").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_get_link() {
    let (server, _repo) = common::create_test_server();
    common::create_test_link(&server, "example.com/page", Some("page123")).await;

    let response = server.get("/api/links/page123").await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "page123");
    assert_eq!(body["url"], "https://example.com/page");
    assert_eq!(body["clicks"], 0);
}

#[tokio::test]
async fn test_get_link_not_found() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/links/missing1").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "Not found");
}

#[tokio::test]
async fn test_delete_link() {
    let (server, repo) = common::create_test_server();
    common::create_test_link(&server, "example.com", Some("gone123")).await;

    let response = server.delete("/api/links/gone123").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));
    assert!(repo.get_by_code("gone123").await.unwrap().is_none());

    let response = server.get("/api/links/gone123").await;
    assert_eq!(response.status_code(), 404);

    let response = server.get("/gone123").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_link_not_found() {
    let (server, _repo) = common::create_test_server();

    let response = server.delete("/api/links/missing1").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_deleted_code_can_be_reused() {
    let (server, _repo) = common::create_test_server();
    common::create_test_link(&server, "https://old.example.com", Some("reuse01")).await;
    server.delete("/api/links/reuse01").await;

    let body = common::create_test_link(&server, "https://new.example.com", Some("reuse01")).await;

    assert_eq!(body["url"], "https://new.example.com");
    assert_eq!(body["clicks"], 0);
}
