//! Redirect resolution and management service.

use std::sync::Arc;

use crate::domain::entities::Slug;
use crate::domain::repositories::RedirectStore;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;
use tracing::info;

/// Service for resolving and managing redirects.
///
/// Validates targets before any write reaches the store and maps store
/// outcomes onto [`AppError`] variants. It never retries: every outcome is
/// reported to the caller as-is.
pub struct RedirectService<S: RedirectStore + ?Sized> {
    store: Arc<S>,
}

impl<S: RedirectStore + ?Sized> RedirectService<S> {
    /// Creates a new redirect service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the target `slug` redirects to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, slug: &Slug) -> Result<String, AppError> {
        Ok(self.store.get(slug).await?)
    }

    /// Creates a redirect from `slug` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `target` is not an absolute URL with a host.
    /// Returns [`AppError::Conflict`] if the slug already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn create(&self, slug: &Slug, target: &str) -> Result<(), AppError> {
        validate_url(target)?;
        self.store.create(slug, target).await?;

        info!(%slug, url = target, "Redirect created");
        Ok(())
    }

    /// Points an existing redirect at a new target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `target` is not an absolute URL with a host.
    /// Returns [`AppError::NotFound`] if the slug does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn update(&self, slug: &Slug, target: &str) -> Result<(), AppError> {
        validate_url(target)?;
        self.store.update(slug, target).await?;

        info!(%slug, url = target, "Redirect updated");
        Ok(())
    }

    /// Removes a redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete(&self, slug: &Slug) -> Result<(), AppError> {
        self.store.delete(slug).await?;

        info!(%slug, "Redirect deleted");
        Ok(())
    }

    /// Reports whether the underlying store is usable.
    pub async fn is_healthy(&self) -> bool {
        self.store.health_check().await
    }
}
