//! Authorization check run before every AJAX action.

use serde_json::json;
use std::sync::Arc;

use super::nonce_service::NonceService;
use crate::domain::action::AjaxAction;
use crate::domain::entities::{MANAGE_DOMAINS, RequestContext};
use crate::error::AppError;

/// Admits a request when the user is logged in, may manage domains, and sent
/// a valid nonce for the action.
pub struct PermissionGate {
    nonces: Arc<NonceService>,
}

impl PermissionGate {
    pub fn new(nonces: Arc<NonceService>) -> Self {
        Self { nonces }
    }

    /// Issues a nonce for a follow-up action of the same user.
    pub fn issue_nonce(&self, ctx: &RequestContext, action: AjaxAction) -> String {
        self.nonces.create(action, ctx.user_id)
    }

    /// Runs the permission check for `action`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the user is anonymous, lacks the
    /// `manage_domains` capability, or the nonce is missing or invalid.
    pub fn authorize(
        &self,
        ctx: &RequestContext,
        action: AjaxAction,
        nonce: Option<&str>,
    ) -> Result<(), AppError> {
        if !ctx.is_logged_in() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "action": action.as_str(), "reason": "anonymous user" }),
            ));
        }

        if !ctx.can(MANAGE_DOMAINS) {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({
                    "action": action.as_str(),
                    "user_id": ctx.user_id,
                    "reason": "missing capability",
                }),
            ));
        }

        let valid = nonce
            .map(|n| self.nonces.verify(action, ctx.user_id, n.trim()))
            .unwrap_or(false);

        if !valid {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({
                    "action": action.as_str(),
                    "user_id": ctx.user_id,
                    "reason": "invalid nonce",
                }),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn gate() -> PermissionGate {
        PermissionGate::new(Arc::new(NonceService::new(
            "gate-secret".to_string(),
            Duration::from_secs(86_400),
        )))
    }

    fn admin() -> RequestContext {
        RequestContext {
            user_id: 3,
            site_id: 1,
            capabilities: vec![MANAGE_DOMAINS.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_authorize_success() {
        let gate = gate();
        let ctx = admin();
        let nonce = gate.issue_nonce(&ctx, AjaxAction::CheckDomain);

        assert!(
            gate.authorize(&ctx, AjaxAction::CheckDomain, Some(&nonce))
                .is_ok()
        );
    }

    #[test]
    fn test_authorize_anonymous() {
        let gate = gate();
        let ctx = RequestContext {
            user_id: 0,
            ..admin()
        };
        let nonce = gate.issue_nonce(&ctx, AjaxAction::CheckDomain);

        let result = gate.authorize(&ctx, AjaxAction::CheckDomain, Some(&nonce));
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_authorize_missing_capability() {
        let gate = gate();
        let ctx = RequestContext {
            capabilities: vec!["edit_posts".to_string()],
            ..admin()
        };
        let nonce = gate.issue_nonce(&ctx, AjaxAction::CheckDomain);

        let result = gate.authorize(&ctx, AjaxAction::CheckDomain, Some(&nonce));
        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[test]
    fn test_authorize_missing_or_foreign_nonce() {
        let gate = gate();
        let ctx = admin();

        assert!(matches!(
            gate.authorize(&ctx, AjaxAction::CheckDomain, None),
            Err(AppError::Unauthorized { .. })
        ));

        let other_action = gate.issue_nonce(&ctx, AjaxAction::PurchaseDomain);
        assert!(matches!(
            gate.authorize(&ctx, AjaxAction::CheckDomain, Some(&other_action)),
            Err(AppError::Unauthorized { .. })
        ));
    }
}
