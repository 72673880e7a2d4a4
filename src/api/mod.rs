//! HTTP layer translating requests into redirect operations.
//!
//! # Modules
//!
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authorization, rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
