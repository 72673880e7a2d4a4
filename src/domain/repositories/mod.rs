//! Storage contract for redirect entries.
//!
//! The [`RedirectStore`] trait is implemented in `crate::infrastructure::persistence`
//! and auto-mocked with `mockall` under `cfg(test)`.
//!
//! # Testing
//!
//! See `tests/store_filesystem.rs` for the concurrency properties every
//! implementation has to uphold.

pub mod redirect_store;

pub use redirect_store::{RedirectStore, StoreError, StoreResult};

#[cfg(test)]
pub use redirect_store::MockRedirectStore;
