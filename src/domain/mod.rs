//! Domain layer containing the redirect entities and storage contracts.
//!
//! This module is independent of HTTP and of any concrete storage backend.
//!
//! # Architecture
//!
//! - [`entities`] - Slugs and redirect entries
//! - [`repositories`] - The [`repositories::RedirectStore`] contract and its error type
//! - [`authorizer`] - The authorization predicate mutating requests are checked against
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Store implementations live in [`crate::infrastructure::persistence`]
//! - Outcomes are enum variants, never inferred from error message text

pub mod authorizer;
pub mod entities;
pub mod repositories;
