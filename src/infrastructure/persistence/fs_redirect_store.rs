//! Filesystem-backed redirect store.
//!
//! Each entry is a single file named after its slug, directly below the
//! storage root, holding the raw target bytes.

use crate::domain::entities::Slug;
use crate::domain::repositories::{RedirectStore, StoreError, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Permission bits of entry files on Unix.
#[cfg(unix)]
const ENTRY_FILE_MODE: u32 = 0o640;

type LockTable = DashMap<Slug, Arc<Mutex<()>>>;

/// Redirect store persisting one file per slug.
///
/// # Consistency
///
/// - Mutations of the same slug are serialised by a per-slug async mutex;
///   different slugs never contend.
/// - Contents are written to a hidden temp file and fsynced before being
///   published, so readers see either a complete old file, a complete new
///   file, or nothing.
/// - `create` publishes with a hard link, which fails atomically if the
///   entry appeared in the meantime, even when written by another process.
/// - `update` publishes with a rename over the existing file.
///
/// # Cancellation
///
/// Writing and publishing run on the blocking pool and take the slug's lock
/// with them. A caller that gives up mid-write leaves the operation to
/// finish or fail on its own, and its temp file is removed either way.
///
/// Temp files start with `.`, which no slug can, so they are never served.
pub struct FsRedirectStore {
    root: PathBuf,
    locks: LockTable,
}

/// How a fully written temp file becomes the entry.
#[derive(Debug, Clone, Copy)]
enum Publish {
    /// Hard link; fails with `AlreadyExists` if the entry exists.
    Link,
    /// Rename over the existing entry.
    Replace,
}

impl FsRedirectStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be created.
    pub async fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "Opened filesystem redirect store");

        Ok(Self {
            root,
            locks: DashMap::new(),
        })
    }

    /// Storage root all entries live under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, slug: &Slug) -> PathBuf {
        self.root.join(slug.as_str())
    }

    fn temp_path(&self, slug: &Slug) -> PathBuf {
        self.root
            .join(format!(".{}.{}.tmp", slug.as_str(), Uuid::new_v4()))
    }

    /// Acquires the mutation lock for `slug`.
    async fn lock(&self, slug: &Slug) -> SlugGuard<'_> {
        // The map shard lock is released at the end of this statement, before awaiting.
        let lock = self.locks.entry(slug.clone()).or_default().clone();
        let guard = lock.lock_owned().await;

        SlugGuard {
            locks: &self.locks,
            slug: slug.clone(),
            guard: Some(guard),
        }
    }

    /// Writes `target` to a temp file and publishes it as `slug`'s entry.
    ///
    /// The slug's lock moves into the blocking task and is released only
    /// once the temp file is gone.
    async fn publish(
        &self,
        mut guard: SlugGuard<'_>,
        target: &str,
        mode: Publish,
    ) -> std::io::Result<()> {
        let held = guard.hand_off();
        let temp_path = self.temp_path(&guard.slug);
        let path = self.entry_path(&guard.slug);
        let contents = target.as_bytes().to_vec();

        tokio::task::spawn_blocking(move || {
            let _held = held;
            write_and_publish(&temp_path, &path, &contents, mode)
        })
        .await
        .map_err(|e| std::io::Error::other(format!("spawn_blocking failed: {e}")))?
    }

    async fn exists(&self, slug: &Slug, path: &Path) -> StoreResult<bool> {
        fs::try_exists(path)
            .await
            .map_err(|e| StoreError::io(slug, e))
    }
}

#[async_trait]
impl RedirectStore for FsRedirectStore {
    #[instrument(level = "debug", skip(self), fields(backend = "filesystem"))]
    async fn get(&self, slug: &Slug) -> StoreResult<String> {
        let bytes = fs::read(self.entry_path(slug)).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(slug.clone())
            } else {
                StoreError::io(slug, e)
            }
        })?;

        String::from_utf8(bytes)
            .map_err(|e| StoreError::io(slug, std::io::Error::new(ErrorKind::InvalidData, e)))
    }

    #[instrument(level = "debug", skip(self, target), fields(backend = "filesystem"))]
    async fn create(&self, slug: &Slug, target: &str) -> StoreResult<()> {
        let guard = self.lock(slug).await;

        if self.exists(slug, &self.entry_path(slug)).await? {
            return Err(StoreError::AlreadyExists(slug.clone()));
        }

        match self.publish(guard, target, Publish::Link).await {
            Ok(()) => {
                debug!(%slug, "Created entry");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::AlreadyExists(slug.clone()))
            }
            Err(e) => Err(StoreError::io(slug, e)),
        }
    }

    #[instrument(level = "debug", skip(self, target), fields(backend = "filesystem"))]
    async fn update(&self, slug: &Slug, target: &str) -> StoreResult<()> {
        let guard = self.lock(slug).await;

        if !self.exists(slug, &self.entry_path(slug)).await? {
            return Err(StoreError::NotFound(slug.clone()));
        }

        self.publish(guard, target, Publish::Replace)
            .await
            .map_err(|e| StoreError::io(slug, e))?;

        debug!(%slug, "Updated entry");
        Ok(())
    }

    #[instrument(level = "debug", skip(self), fields(backend = "filesystem"))]
    async fn delete(&self, slug: &Slug) -> StoreResult<()> {
        let _guard = self.lock(slug).await;

        match fs::remove_file(self.entry_path(slug)).await {
            Ok(()) => {
                debug!(%slug, "Deleted entry");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(slug.clone())),
            Err(e) => Err(StoreError::io(slug, e)),
        }
    }

    async fn health_check(&self) -> bool {
        fs::metadata(&self.root)
            .await
            .is_ok_and(|meta| meta.is_dir())
    }
}

/// Holds a slug's mutation lock and drops its table entry once unused.
struct SlugGuard<'a> {
    locks: &'a LockTable,
    slug: Slug,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SlugGuard<'_> {
    /// Takes the mutex guard out so it can outlive this table handle.
    ///
    /// The table entry stays while the guard is alive elsewhere, since its
    /// `Arc` keeps the strong count above one.
    fn hand_off(&mut self) -> Option<OwnedMutexGuard<()>> {
        self.guard.take()
    }
}

impl Drop for SlugGuard<'_> {
    fn drop(&mut self) {
        // Release the mutex (and its Arc) first so an idle entry has a count of one.
        self.guard.take();
        self.locks
            .remove_if(&self.slug, |_, lock| Arc::strong_count(lock) == 1);
    }
}

/// A temp file that is unlinked when dropped.
struct TempFile<'a> {
    path: &'a Path,
}

impl<'a> TempFile<'a> {
    fn create(path: &'a Path) -> std::io::Result<(Self, std::fs::File)> {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(ENTRY_FILE_MODE);
        }
        let file = options.open(path)?;

        Ok((Self { path }, file))
    }
}

impl Drop for TempFile<'_> {
    fn drop(&mut self) {
        // After a successful rename there is nothing left to remove.
        if let Err(e) = std::fs::remove_file(self.path)
            && e.kind() != ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %e, "Failed to remove temp file");
        }
    }
}

/// Blocking half of [`FsRedirectStore::publish`].
fn write_and_publish(
    temp_path: &Path,
    path: &Path,
    contents: &[u8],
    mode: Publish,
) -> std::io::Result<()> {
    let (_temp, mut file) = TempFile::create(temp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    match mode {
        Publish::Link => std::fs::hard_link(temp_path, path),
        Publish::Replace => std::fs::rename(temp_path, path),
    }
}
