//! Handler for the availability check endpoint.

use askama::Template;
use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};

use crate::api::dto::check_domain::{CheckDomainData, CheckDomainForm};
use crate::api::dto::envelope::Envelope;
use crate::domain::action::AjaxAction;
use crate::domain::entities::RequestContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::fragments::{CheckAvailableFragment, CheckUnavailableFragment, purchase_link};

/// Checks whether a domain can be bought and renders the result notice.
///
/// # Endpoint
///
/// `POST /ajax/check-domain` (form-encoded)
///
/// # Request Body
///
/// ```text
/// nonce=<token for domainmapping_check_domain>&sld=example&tld=com
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "available": true,
///     "html": "<div class=\"domainmapping-info domainmapping-info-success\">..."
///   }
/// }
/// ```
///
/// The "available" notice links to the purchase form with a fresh token for
/// `domainmapping_get_purchase_form`.
///
/// # Errors
///
/// - **403**: permission check failed, including a body the token cannot be
///   read from
/// - **200** `{"success": false, "data": {"message": "Domain name is invalid."}}`
/// - **200** `{"success": false}`: no reseller, reseller or cache failure
pub async fn check_domain_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    payload: Result<Form<CheckDomainForm>, FormRejection>,
) -> Result<Json<Envelope<CheckDomainData>>, AppError> {
    let nonce = payload.as_ref().ok().and_then(|Form(f)| f.nonce.as_deref());
    state
        .permission_gate
        .authorize(&ctx, AjaxAction::CheckDomain, nonce)?;

    let Form(form) = payload?;

    let outcome = state
        .purchase_service
        .check_domain(&ctx, &form.sld, &form.tld)
        .await?;

    let html = if outcome.available {
        let nonce = state
            .permission_gate
            .issue_nonce(&ctx, AjaxAction::GetPurchaseForm);
        let link = purchase_link(&state.public_base_url, &nonce, &outcome.check.tld)?;

        CheckAvailableFragment::new(&outcome.check, &link).render()?
    } else {
        CheckUnavailableFragment {
            domain: outcome.check.domain.clone(),
        }
        .render()?
    };

    Ok(Json(Envelope::success(CheckDomainData {
        available: outcome.available,
        html,
    })))
}
