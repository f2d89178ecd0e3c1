//! Handler for the purchase form endpoint.

use askama::Template;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::envelope::Envelope;
use crate::api::dto::purchase_form::{PurchaseFormData, PurchaseFormQuery};
use crate::domain::action::AjaxAction;
use crate::domain::entities::RequestContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::fragments::{PurchaseFormFragment, action_url};

/// Renders the purchase form for the user's last availability check.
///
/// # Endpoint
///
/// `GET /ajax/purchase-form?action=domainmapping_get_purchase_form&nonce=...&tld=com`
///
/// This is the link rendered by [`super::check_domain_handler`].
///
/// # Response
///
/// ```json
/// { "success": true, "data": { "html": "<form class=\"domainmapping-purchase-form\" ...>" } }
/// ```
///
/// # Errors
///
/// - **403**: permission check failed, including a query string the token
///   cannot be read from
/// - **200** `{"success": false}`: no reseller or no cached check
pub async fn purchase_form_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    params: Result<Query<PurchaseFormQuery>, QueryRejection>,
) -> Result<Json<Envelope<PurchaseFormData>>, AppError> {
    let nonce = params.as_ref().ok().and_then(|Query(q)| q.nonce.as_deref());
    state
        .permission_gate
        .authorize(&ctx, AjaxAction::GetPurchaseForm, nonce)?;

    let Query(query) = params?;

    let form = state.purchase_service.get_purchase_form(&ctx).await?;

    if let Some(tld) = query.tld.as_deref()
        && tld != form.check.tld
    {
        tracing::debug!(
            requested = tld,
            cached = %form.check.tld,
            "Purchase form rendered for the cached check"
        );
    }

    let nonce = state
        .permission_gate
        .issue_nonce(&ctx, AjaxAction::PurchaseDomain);
    let action = action_url(&state.public_base_url, AjaxAction::PurchaseDomain)?;

    let html = PurchaseFormFragment::new(
        &form.check,
        form.card_types,
        form.cardholder,
        form.countries,
        &action,
        nonce,
    )
    .render()?;

    Ok(Json(Envelope::success(PurchaseFormData { html })))
}
