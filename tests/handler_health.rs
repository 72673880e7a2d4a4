mod common;

use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use gry::api::handlers::health_handler;
use gry::state::AppState;

fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/.well-known/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _store) = common::create_test_state();
    let server = make_server(state);

    let response = server.get("/.well-known/health").await;

    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_health_filesystem_store() {
    let (state, _store, _dir) = common::create_fs_test_state().await;
    let server = make_server(state);

    server.get("/.well-known/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_health_storage_missing() {
    let (state, store, _dir) = common::create_fs_test_state().await;
    std::fs::remove_dir_all(store.root()).unwrap();

    let server = make_server(state);
    let response = server.get("/.well-known/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
