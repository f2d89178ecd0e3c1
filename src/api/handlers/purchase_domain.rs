//! Handler for the purchase endpoint.

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};

use crate::api::dto::envelope::Envelope;
use crate::api::dto::purchase_domain::{PurchaseDomainData, PurchaseDomainForm};
use crate::domain::action::AjaxAction;
use crate::domain::entities::{PurchaseOrder, RequestContext};
use crate::error::AppError;
use crate::state::AppState;

/// Buys a domain through the reseller and maps it onto the current site.
///
/// # Endpoint
///
/// `POST /ajax/purchase-domain` (form-encoded, as posted by the purchase form)
///
/// # Response
///
/// ```json
/// { "success": true, "data": { "domain": "example.com", "mapped": true } }
/// { "success": true, "data": { "domain": "example.com", "mapped": false, "reason": "domain_claimed" } }
/// ```
///
/// A purchase that went through is a success even if the domain could not be
/// mapped; `reason` is one of `site_already_mapped`, `domain_claimed` or
/// `storage_failed`.
///
/// # Errors
///
/// - **403**: permission check failed, including a body the token cannot be
///   read from
/// - **200** `{"success": false}`: no reseller, reseller failure or declined purchase
pub async fn purchase_domain_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Form<PurchaseDomainForm>, FormRejection>,
) -> Result<Json<Envelope<PurchaseDomainData>>, AppError> {
    let nonce = payload.as_ref().ok().and_then(|Form(f)| f.nonce.as_deref());
    state
        .permission_gate
        .authorize(&ctx, AjaxAction::PurchaseDomain, nonce)?;

    let Form(form) = payload?;

    let order = PurchaseOrder::from(form);
    let outcome = state.purchase_service.purchase_domain(&ctx, order).await?;

    Ok(Json(Envelope::success(PurchaseDomainData::from(outcome))))
}
