//! Application layer services implementing business logic.
//!
//! Services consume the domain traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Redirect resolution, validation and CRUD
//! - [`services::auth_service::AuthService`] - Authorization of mutating requests

pub mod services;
