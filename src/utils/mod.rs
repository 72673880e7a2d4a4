//! Utility functions shared across layers.
//!
//! - [`url_validator`] - Target URL validation
pub mod url_validator;
