//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`auth`] - Authorization backends (TOTP)
//! - [`persistence`] - Redirect store implementations (filesystem and in-memory)

pub mod auth;
pub mod persistence;
