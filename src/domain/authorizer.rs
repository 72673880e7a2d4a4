//! Authorization predicate for mutating requests.

/// Decides whether a credential presented with a request may mutate redirects.
///
/// The redirect store and URL validator never see this trait; it is evaluated
/// by the HTTP layer before any mutating store call.
///
/// # Implementations
///
/// - [`crate::infrastructure::auth::TotpAuthorizer`] - time-based one-time passwords
#[cfg_attr(test, mockall::automock)]
pub trait Authorizer: Send + Sync {
    /// Returns `true` when `token` grants write access right now.
    fn is_authorized(&self, token: &str) -> bool;
}
