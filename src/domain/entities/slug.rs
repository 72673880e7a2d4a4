//! Slug newtype guarding the `[A-Za-z0-9_-]+` key syntax.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug pattern is a valid regex"));

/// Errors produced when parsing a slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("slug must not be empty")]
    Empty,

    #[error("slug may only contain letters, digits, '-' and '_': {0:?}")]
    InvalidCharacters(String),
}

/// The lookup key of a redirect.
///
/// Only ASCII letters, digits, `-` and `_` are allowed. Since neither `.` nor
/// path separators can appear, a slug is always safe to use as a single file
/// name below the storage root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    /// Parses and validates a slug.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Empty`] for an empty string and
    /// [`SlugError::InvalidCharacters`] for anything outside `[A-Za-z0-9_-]`.
    pub fn parse(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();

        if value.is_empty() {
            return Err(SlugError::Empty);
        }

        if !SLUG_PATTERN.is_match(&value) {
            return Err(SlugError::InvalidCharacters(value));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        for raw in ["a", "abc123", "my-link", "my_link", "ABC-def_09"] {
            let slug = Slug::parse(raw).unwrap();
            assert_eq!(slug.as_str(), raw);
        }
    }

    #[test]
    fn test_empty_slug() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
    }

    #[test]
    fn test_rejects_path_like_slugs() {
        for raw in ["..", "a/b", "../etc", ".hidden", "a.b", "a b", "ü"] {
            assert!(
                matches!(Slug::parse(raw), Err(SlugError::InvalidCharacters(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_str_and_display() {
        let slug: Slug = "docs".parse().unwrap();
        assert_eq!(slug.to_string(), "docs");
        assert_eq!(slug.into_inner(), "docs");
    }
}
