#![allow(dead_code)]

use axum::extract::ConnectInfo;
use gry::domain::authorizer::Authorizer;
use gry::domain::entities::Slug;
use gry::domain::repositories::RedirectStore;
use gry::infrastructure::persistence::{FsRedirectStore, MemoryRedirectStore};
use gry::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

/// The only code [`FixedCodeAuthorizer`] accepts.
pub const VALID_CODE: &str = "123456";

pub const HOME_URL: &str = "https://home.example.com/";

/// Accepts exactly [`VALID_CODE`].
pub struct FixedCodeAuthorizer;

impl Authorizer for FixedCodeAuthorizer {
    fn is_authorized(&self, token: &str) -> bool {
        token == VALID_CODE
    }
}

pub fn slug(raw: &str) -> Slug {
    Slug::parse(raw).unwrap()
}

pub fn create_test_state() -> (AppState, Arc<MemoryRedirectStore>) {
    let store = Arc::new(MemoryRedirectStore::new());
    let state = AppState::new(store.clone(), Arc::new(FixedCodeAuthorizer), HOME_URL);

    (state, store)
}

pub async fn create_fs_test_state() -> (AppState, Arc<FsRedirectStore>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FsRedirectStore::new(dir.path().join("store")).await.unwrap());
    let state = AppState::new(store.clone(), Arc::new(FixedCodeAuthorizer), HOME_URL);

    (state, store, dir)
}

pub async fn create_test_link(store: &dyn RedirectStore, raw_slug: &str, target: &str) {
    store.create(&slug(raw_slug), target).await.unwrap();
}

/// Supplies the peer address that `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
