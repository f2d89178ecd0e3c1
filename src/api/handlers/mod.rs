//! HTTP request handlers for the AJAX endpoints.
//!
//! Each handler runs the permission check before anything else, calls the
//! purchase service and wraps the result in the JSON envelope.

pub mod check_domain;
pub mod health;
pub mod purchase_domain;
pub mod purchase_form;

pub use check_domain::check_domain_handler;
pub use health::health_handler;
pub use purchase_domain::purchase_domain_handler;
pub use purchase_form::purchase_form_handler;
