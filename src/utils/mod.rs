//! Pure helpers used by the link service.
//!
//! - [`hasher`] - Short key derivation from URL bytes
//! - [`url_validator`] - Scheme and host checks for submitted URLs

pub mod hasher;
pub mod url_validator;
