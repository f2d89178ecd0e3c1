//! Server-side rendered HTML for the purchase workflow.
//!
//! The AJAX endpoints return HTML snippets inside their JSON envelope; the
//! host page inserts them as-is. Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`fragments`] - Availability notices, purchase form and endpoint links

pub mod fragments;
