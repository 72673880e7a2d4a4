//! Target URL validation.
//!
//! Gates every create and update before it reaches the redirect store.

use url::Url;

/// Reasons a candidate target is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("invalid URL format")]
    InvalidFormat,
}

/// Checks that `candidate` is an absolute URL with both a scheme and a host.
///
/// # Rules
///
/// 1. Must parse as an absolute URL (relative references are rejected)
/// 2. Scheme must be non-empty (`http`, `https`, ...)
/// 3. Host must be non-empty (`http://` alone is rejected)
/// 4. The scheme must be followed by `//` as written; the parser's fix-ups
///    for `http:example.com` or `http:\\example.com` do not count
/// 5. No surrounding whitespace and no ASCII control characters; the target
///    ends up in a `Location` header
///
/// The candidate is not rewritten: callers store exactly what they passed in,
/// so every rule applies to the text itself and not only to the parsed URL.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] when any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com").is_ok());
/// assert!(validate_url("example.com").is_err());  // no scheme
/// assert!(validate_url("http://").is_err());      // no host
/// ```
pub fn validate_url(candidate: &str) -> Result<(), UrlValidationError> {
    if candidate.trim() != candidate || candidate.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::InvalidFormat);
    }

    let url = Url::parse(candidate).map_err(|_| UrlValidationError::InvalidFormat)?;

    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    let has_authority = candidate
        .get(url.scheme().len() + 1..)
        .is_some_and(|rest| rest.starts_with("//"));
    if url.scheme().is_empty() || !has_host || !has_authority {
        return Err(UrlValidationError::InvalidFormat);
    }

    Ok(())
}
