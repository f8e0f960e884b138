//! Infrastructure layer implementing the domain storage contract.
//!
//! # Modules
//!
//! - [`persistence`] - In-memory and file-backed repositories

pub mod persistence;
