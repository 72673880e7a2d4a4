//! Redirect store implementations.
//!
//! # Stores
//!
//! - [`FsRedirectStore`] - Durable, one file per slug below a storage root
//! - [`MemoryRedirectStore`] - Ephemeral, for tests and throwaway deployments

pub mod fs_redirect_store;
pub mod memory_redirect_store;

pub use fs_redirect_store::FsRedirectStore;
pub use memory_redirect_store::MemoryRedirectStore;
