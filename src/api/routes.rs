//! AJAX route configuration.
//!
//! Identity comes from the host's trusted headers (see
//! [`crate::api::extractors`]); every handler runs the permission check itself.

use crate::api::handlers::{
    check_domain_handler, purchase_domain_handler, purchase_form_handler,
};
use crate::domain::action::AjaxAction;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Read-only steps of the workflow.
///
/// # Endpoints
///
/// - `POST /ajax/check-domain`  - Availability and price of a domain
/// - `GET  /ajax/purchase-form` - Purchase form for the last checked domain
pub fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route(AjaxAction::CheckDomain.path(), post(check_domain_handler))
        .route(AjaxAction::GetPurchaseForm.path(), get(purchase_form_handler))
}

/// The step that spends money.
///
/// # Endpoints
///
/// - `POST /ajax/purchase-domain` - Purchase and map a domain
pub fn purchase_routes() -> Router<AppState> {
    Router::new().route(
        AjaxAction::PurchaseDomain.path(),
        post(purchase_domain_handler),
    )
}
