//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Slug`] - A validated redirect key
//!
//! A slug maps to exactly one target or does not exist; entries carry no
//! history or timestamps.

pub mod slug;

pub use slug::{Slug, SlugError};
