//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`DomainCandidate`] / [`DomainCheck`] - A domain being priced and its check result
//! - [`Mapping`] - A purchased domain attached to a site
//! - [`PurchaseOrder`] / [`PurchaseOutcome`] - What is sent to the reseller and what came of it
//! - [`RequestContext`] - The acting user and site
//!
//! Creation inputs use separate structs (`NewMapping`), following the
//! "New Type" pattern used across the crate.

pub mod context;
pub mod domain_check;
pub mod mapping;
pub mod purchase;

pub use context::{CARDHOLDER_PLACEHOLDER, MANAGE_DOMAINS, RequestContext};
pub use domain_check::{DomainCandidate, DomainCheck};
pub use mapping::{MapOutcome, Mapping, NewMapping};
pub use purchase::{
    BillingCard, CardType, NotMappedReason, PurchaseOrder, PurchaseOutcome, Registrant,
};
