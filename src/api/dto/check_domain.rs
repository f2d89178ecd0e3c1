//! DTOs for the availability check endpoint.

use serde::{Deserialize, Serialize};

/// Form body of `POST /ajax/check-domain`.
///
/// Missing fields deserialize as empty strings and fail domain validation.
#[derive(Debug, Deserialize)]
pub struct CheckDomainForm {
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub sld: String,
    #[serde(default)]
    pub tld: String,
}

#[derive(Debug, Serialize)]
pub struct CheckDomainData {
    pub available: bool,
    pub html: String,
}
