//! Application layer services.
//!
//! Services coordinate validation, key derivation and repository calls, and
//! give HTTP handlers a small API to work against.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, resolution and listing

pub mod services;
