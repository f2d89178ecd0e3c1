//! Domain layer containing business entities and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`reseller`] - The external reseller contract
//! - [`events`] - Domain events and the sink they are published to
//! - [`action`] - The AJAX actions served
//! - [`countries`] - Static country list for registrant addresses
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Collaborator traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod action;
pub mod countries;
pub mod entities;
pub mod events;
pub mod repositories;
pub mod reseller;
