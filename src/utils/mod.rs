//! Small helpers shared across layers.
//!
//! - [`domain_name`] - Domain name grammar
//! - [`currency`] - Price formatting for display

pub mod currency;
pub mod domain_name;
