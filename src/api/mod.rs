//! AJAX API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into purchase operations and formats
//! responses as the `{success, data}` envelope the host page expects.
//!
//! # Modules
//!
//! - [`dto`] - Request forms and response payloads
//! - [`extractors`] - Request context from host-supplied headers
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
