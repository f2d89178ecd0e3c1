//! Business logic services for the application layer.

pub mod nonce_service;
pub mod permission_gate;
pub mod purchase_service;

pub use nonce_service::NonceService;
pub use permission_gate::PermissionGate;
pub use purchase_service::{
    CheckOutcome, PurchaseForm, PurchaseService, PurchaseSettings, INVALID_DOMAIN_MESSAGE,
};
