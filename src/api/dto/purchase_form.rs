//! DTOs for the purchase form endpoint.

use serde::{Deserialize, Serialize};

/// Query string of `GET /ajax/purchase-form`, as produced by the purchase link.
#[derive(Debug, Deserialize)]
pub struct PurchaseFormQuery {
    #[serde(default)]
    pub nonce: Option<String>,
    /// Present in the link for the host's script; the form itself uses the
    /// cached check.
    #[serde(default)]
    pub tld: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseFormData {
    pub html: String,
}
