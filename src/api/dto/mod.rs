//! Data Transfer Objects for AJAX requests and responses.
//!
//! Request DTOs are form-encoded bodies or query strings; every response is
//! wrapped in [`envelope::Envelope`].

pub mod check_domain;
pub mod envelope;
pub mod health;
pub mod purchase_domain;
pub mod purchase_form;
