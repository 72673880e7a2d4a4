//! Authorization backends implementing [`crate::domain::authorizer::Authorizer`].

mod totp_authorizer;

pub use totp_authorizer::{TotpAuthorizer, TotpError, generate_secret};
