//! Domain layer containing entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define contracts implemented by
//! [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
