//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Per-user short-lived state (Redis and in-process implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`reseller`] - Reseller backends
//! - [`events`] - Domain event queue, worker and webhook delivery

pub mod cache;
pub mod events;
pub mod persistence;
pub mod reseller;
