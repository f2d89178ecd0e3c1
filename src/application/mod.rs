//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the reseller,
//! the cache and the repository. Services consume domain traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::purchase_service::PurchaseService`] - Availability check, purchase form, purchase and mapping
//! - [`services::permission_gate::PermissionGate`] - Capability and nonce check run before every action
//! - [`services::nonce_service::NonceService`] - Anti-forgery token issuing and verification

pub mod services;
