mod common;

use serde_json::Value;

#[tokio::test]
async fn test_health_reports_version() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/healthz").await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert_eq!(body["ok"], true);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/some/deep/path").await;

    assert_eq!(response.status_code(), 404);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Not found");
}
