//! HTTP layer: handlers, DTOs, middleware and routes.
//!
//! This layer translates HTTP requests into [`crate::application`] service
//! calls and renders their results.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for JSON requests and responses
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing, access log and gzip middleware
//! - [`routes`] - `/api` route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
