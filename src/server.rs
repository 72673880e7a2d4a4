//! HTTP server initialization and runtime setup.
//!
//! Builds the redirect store and authorizer from [`Config`] and runs the Axum
//! server.

use crate::config::{Config, StorageBackend};
use crate::domain::authorizer::Authorizer;
use crate::domain::repositories::RedirectStore;
use crate::infrastructure::auth::TotpAuthorizer;
use crate::infrastructure::persistence::{FsRedirectStore, MemoryRedirectStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Opens the redirect store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the filesystem storage root cannot be created.
pub async fn open_store(config: &Config) -> Result<Arc<dyn RedirectStore>> {
    let store: Arc<dyn RedirectStore> = match config.storage_backend {
        StorageBackend::Filesystem => {
            let store = FsRedirectStore::new(&config.storage_path)
                .await
                .with_context(|| {
                    format!(
                        "Failed to create storage directory {}",
                        config.storage_path.display()
                    )
                })?;
            tracing::info!("Storage ready at {}", store.root().display());
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, redirects will be lost on restart");
            Arc::new(MemoryRedirectStore::new())
        }
    };

    Ok(store)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redirect store (filesystem or in-memory)
/// - TOTP authorizer
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The storage root cannot be created
/// - The TOTP secret is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = open_store(&config).await?;

    let authorizer: Arc<dyn Authorizer> = Arc::new(
        TotpAuthorizer::from_base32(&config.totp_secret).context("Invalid GRY_TOTP_SECRET")?,
    );

    let state = AppState::new(store, authorizer, config.home_url.as_str());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
