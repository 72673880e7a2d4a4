//! # GRY
//!
//! A small URL redirect service built with Axum: `GET /{slug}` answers with a
//! `302` to the stored target, and holders of a one-time password can create,
//! change and delete slugs.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Slugs, entries, the store and authorizer contracts
//! - **Application Layer** ([`application`]) - Redirect and authorization services
//! - **Infrastructure Layer** ([`infrastructure`]) - Filesystem/in-memory stores, TOTP
//! - **API Layer** ([`api`]) - Handlers, middleware and routes
//!
//! ## Consistency
//!
//! The store checks and mutates each slug atomically: concurrent creates of
//! one slug have exactly one winner, and readers never see a partially
//! written target.
//!
//! ## Quick Start
//!
//! ```bash
//! export GRY_TOTP_SECRET="$(cargo run --bin gry-admin -- secret generate --quiet)"
//! cargo run
//!
//! curl -X POST -H "Authorization: $(cargo run -q --bin gry-admin -- secret code)" \
//!      --data "https://www.rust-lang.org" http://localhost:3000/rust
//! curl -i http://localhost:3000/rust
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, RedirectService};
    pub use crate::domain::authorizer::Authorizer;
    pub use crate::domain::entities::Slug;
    pub use crate::domain::repositories::{RedirectStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
