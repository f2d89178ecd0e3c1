//! Reseller backends.
//!
//! Production registrar clients plug in by implementing
//! [`crate::domain::reseller::Reseller`]; this module ships the sandbox used
//! for development and staging.

mod sandbox;

pub use sandbox::SandboxReseller;
