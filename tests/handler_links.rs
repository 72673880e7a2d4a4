mod common;

use axum::{Router, http::StatusCode, middleware};
use axum_test::TestServer;
use gry::api::middleware::auth;
use gry::api::routes::{protected_routes, public_routes};
use gry::domain::repositories::{RedirectStore, StoreError};
use gry::state::AppState;
use serde_json::Value;

/// Public and protected routes with authorization, without rate limiting.
fn make_server(state: AppState) -> TestServer {
    let protected = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let app = Router::new()
        .merge(public_routes())
        .merge(protected)
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn bearer() -> String {
    format!("Bearer {}", common::VALID_CODE)
}

// ─── AUTHORIZATION ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_without_authorization() {
    let (state, store) = common::create_test_state();
    let server = make_server(state);

    let response = server.post("/new").text("https://example.com").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_with_wrong_code() {
    let (state, store) = common::create_test_state();
    let server = make_server(state);

    server
        .post("/new")
        .add_header("Authorization", "Bearer 000000")
        .text("https://example.com")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_raw_code_header_is_accepted() {
    let (state, _store) = common::create_test_state();
    let server = make_server(state);

    server
        .post("/raw")
        .add_header("Authorization", common::VALID_CODE)
        .text("https://example.com")
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_every_mutation_requires_authorization() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&*store, "locked", "https://example.com/locked").await;
    let server = make_server(state);

    server
        .put("/other")
        .text("https://example.com")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .patch("/locked")
        .text("https://example.com/changed")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete("/locked")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(
        store.get(&common::slug("locked")).await.unwrap(),
        "https://example.com/locked"
    );
}

#[tokio::test]
async fn test_redirect_does_not_require_authorization() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&*store, "open", "https://example.com/open").await;
    let server = make_server(state);

    server.get("/open").await.assert_status(StatusCode::FOUND);
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_link_success() {
    let (state, store) = common::create_test_state();
    let server = make_server(state);

    let response = server
        .post("/docs")
        .add_header("Authorization", bearer())
        .text("https://docs.example.com/page")
        .await;

    response.assert_status(StatusCode::CREATED);
    response.assert_text("Created");
    assert_eq!(
        store.get(&common::slug("docs")).await.unwrap(),
        "https://docs.example.com/page"
    );

    let redirect = server.get("/docs").await;
    redirect.assert_status(StatusCode::FOUND);
    assert_eq!(redirect.header("location"), "https://docs.example.com/page");
}

#[tokio::test]
async fn test_create_with_put() {
    let (state, store) = common::create_test_state();
    let server = make_server(state);

    server
        .put("/put-link")
        .add_header("Authorization", bearer())
        .text("https://example.com/put")
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_create_trims_body() {
    let (state, store) = common::create_test_state();
    let server = make_server(state);

    server
        .post("/trim")
        .add_header("Authorization", bearer())
        .text("  https://example.com/trimmed\n")
        .await
        .assert_status(StatusCode::CREATED);

    assert_eq!(
        store.get(&common::slug("trim")).await.unwrap(),
        "https://example.com/trimmed"
    );
}

#[tokio::test]
async fn test_create_duplicate_conflict() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&*store, "taken", "https://example.com/first").await;
    let server = make_server(state);

    let response = server
        .post("/taken")
        .add_header("Authorization", bearer())
        .text("https://example.com/second")
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "conflict");
    assert_eq!(json["error"]["message"], "Nope! Path already exists.");

    assert_eq!(
        store.get(&common::slug("taken")).await.unwrap(),
        "https://example.com/first"
    );
}

#[tokio::test]
async fn test_create_invalid_url() {
    let (state, store) = common::create_test_state();
    let server = make_server(state);

    for body in [
        "",
        "not a url",
        "example.com/no-scheme",
        "mailto:someone@example.com",
        "http:example.com",
        "https:/example.com",
    ] {
        let response = server
            .post("/bad")
            .add_header("Authorization", bearer())
            .text(body)
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_invalid_slug() {
    let (state, store) = common::create_test_state();
    let server = make_server(state);

    server
        .post("/bad.slug")
        .add_header("Authorization", bearer())
        .text("https://example.com")
        .await
        .assert_status_bad_request();

    assert!(store.is_empty());
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_link_success() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&*store, "upd", "https://example.com/old").await;
    let server = make_server(state);

    server
        .patch("/upd")
        .add_header("Authorization", bearer())
        .text("https://example.com/new")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(
        store.get(&common::slug("upd")).await.unwrap(),
        "https://example.com/new"
    );
}

#[tokio::test]
async fn test_update_link_not_found() {
    let (state, store) = common::create_test_state();
    let server = make_server(state);

    server
        .patch("/missing")
        .add_header("Authorization", bearer())
        .text("https://example.com/new")
        .await
        .assert_status_not_found();

    assert!(matches!(
        store.get(&common::slug("missing")).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_invalid_url_keeps_target() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&*store, "keep", "https://example.com/keep").await;
    let server = make_server(state);

    server
        .patch("/keep")
        .add_header("Authorization", bearer())
        .text("nonsense")
        .await
        .assert_status_bad_request();

    assert_eq!(
        store.get(&common::slug("keep")).await.unwrap(),
        "https://example.com/keep"
    );
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link_success() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&*store, "del001", "https://example.com").await;
    let server = make_server(state);

    server
        .delete("/del001")
        .add_header("Authorization", bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.get("/del001").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link_twice() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&*store, "del002", "https://example.com").await;
    let server = make_server(state);

    server
        .delete("/del002")
        .add_header("Authorization", bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // Second delete returns 404, the slug is gone.
    server
        .delete("/del002")
        .add_header("Authorization", bearer())
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_slug_reusable_after_delete() {
    let (state, _store) = common::create_test_state();
    let server = make_server(state);

    for target in ["https://example.com/one", "https://example.com/two"] {
        server
            .post("/again")
            .add_header("Authorization", bearer())
            .text(target)
            .await
            .assert_status(StatusCode::CREATED);
        assert_eq!(server.get("/again").await.header("location"), target);
        server
            .delete("/again")
            .add_header("Authorization", bearer())
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }
}

// ─── FILESYSTEM ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_lifecycle_on_filesystem_store() {
    let (state, store, _dir) = common::create_fs_test_state().await;
    let server = make_server(state);

    server
        .post("/fs")
        .add_header("Authorization", bearer())
        .text("https://example.com/a")
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(
        std::fs::read_to_string(store.root().join("fs")).unwrap(),
        "https://example.com/a"
    );

    server
        .patch("/fs")
        .add_header("Authorization", bearer())
        .text("https://example.com/b")
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert_eq!(server.get("/fs").await.header("location"), "https://example.com/b");

    server
        .delete("/fs")
        .add_header("Authorization", bearer())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(!store.root().join("fs").exists());
}
