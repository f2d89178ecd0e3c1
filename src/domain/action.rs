//! The AJAX actions this service answers.

use std::fmt;

/// One variant per AJAX entry point.
///
/// The string form is the action name the host platform uses; it is also the
/// scope anti-forgery tokens are bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AjaxAction {
    CheckDomain,
    GetPurchaseForm,
    PurchaseDomain,
}

impl AjaxAction {
    pub const ALL: [AjaxAction; 3] = [
        AjaxAction::CheckDomain,
        AjaxAction::GetPurchaseForm,
        AjaxAction::PurchaseDomain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AjaxAction::CheckDomain => "domainmapping_check_domain",
            AjaxAction::GetPurchaseForm => "domainmapping_get_purchase_form",
            AjaxAction::PurchaseDomain => "domainmapping_purchase_domain",
        }
    }

    /// Route of the action, relative to the service root.
    pub fn path(&self) -> &'static str {
        match self {
            AjaxAction::CheckDomain => "/ajax/check-domain",
            AjaxAction::GetPurchaseForm => "/ajax/purchase-form",
            AjaxAction::PurchaseDomain => "/ajax/purchase-domain",
        }
    }
}

impl fmt::Display for AjaxAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AjaxAction {
    type Err = String;

    /// Accepts the full action name or its short form (`check_domain`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("domainmapping_").unwrap_or(s);
        match name {
            "check_domain" => Ok(AjaxAction::CheckDomain),
            "get_purchase_form" => Ok(AjaxAction::GetPurchaseForm),
            "purchase_domain" => Ok(AjaxAction::PurchaseDomain),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}
