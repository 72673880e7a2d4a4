//! Redirect store trait and error types.

use crate::domain::entities::Slug;
use async_trait::async_trait;

/// Outcomes of a store operation other than success.
///
/// Callers match on the variant; the message text is for logs only.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("slug does not exist: {0}")]
    NotFound(Slug),

    #[error("slug already exists: {0}")]
    AlreadyExists(Slug),

    #[error("storage I/O failed for {slug}: {source}")]
    Io {
        slug: Slug,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(slug: &Slug, source: std::io::Error) -> Self {
        Self::Io {
            slug: slug.clone(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Slug-keyed storage of redirect targets with existence-checked mutation.
///
/// Every implementation must make check-and-mutate a single atomic unit per
/// slug and publish writes all at once: concurrent creates of one slug yield
/// exactly one success, and readers observe either the old or the new target.
/// Operations on different slugs must not block each other.
///
/// Targets are stored as given; validation is the caller's job.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::FsRedirectStore`] - one file per slug
/// - [`crate::infrastructure::persistence::MemoryRedirectStore`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectStore: Send + Sync {
    /// Returns the stored target for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no entry exists.
    /// Returns [`StoreError::Io`] if the backend could not be read.
    async fn get(&self, slug: &Slug) -> StoreResult<String>;

    /// Stores a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if an entry for `slug` exists;
    /// the stored value is left untouched.
    /// Returns [`StoreError::Io`] if the entry could not be written.
    async fn create(&self, slug: &Slug, target: &str) -> StoreResult<()>;

    /// Replaces the target of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no entry exists; nothing is created.
    /// Returns [`StoreError::Io`] if the entry could not be written.
    async fn update(&self, slug: &Slug, target: &str) -> StoreResult<()>;

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no entry exists.
    /// Returns [`StoreError::Io`] if the entry could not be removed.
    async fn delete(&self, slug: &Slug) -> StoreResult<()>;

    /// Reports whether the backend is usable.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
