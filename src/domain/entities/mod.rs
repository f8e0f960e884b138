//! Core domain entities.
//!
//! - [`Link`] - A short key mapped to its original URL

pub mod link;

pub use link::Link;
