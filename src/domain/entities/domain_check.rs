//! Purchase candidates and availability check results.

use serde::{Deserialize, Serialize};

use crate::utils::domain_name::{DomainNameError, validate_domain_name};

/// A second-level label and a top-level suffix that together form a valid
/// domain name.
///
/// Both parts are trimmed and lower-cased on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCandidate {
    sld: String,
    tld: String,
}

impl DomainCandidate {
    /// Normalizes and validates the `"{sld}.{tld}"` composition.
    ///
    /// # Errors
    ///
    /// Returns [`DomainNameError`] if the composed domain violates the grammar
    /// (including an empty `sld` or `tld`).
    pub fn parse(sld: &str, tld: &str) -> Result<Self, DomainNameError> {
        let sld = sld.trim().to_lowercase();
        let tld = tld.trim().to_lowercase();

        validate_domain_name(&format!("{sld}.{tld}"))?;

        Ok(Self { sld, tld })
    }

    pub fn sld(&self) -> &str {
        &self.sld
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    pub fn domain(&self) -> String {
        format!("{}.{}", self.sld, self.tld)
    }
}

/// The outcome of an availability check, kept per user so that the purchase
/// form can be built from it.
///
/// `price` is `None` when the domain is not available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainCheck {
    pub domain: String,
    pub price: Option<String>,
    pub sld: String,
    pub tld: String,
}

impl DomainCheck {
    pub fn new(candidate: &DomainCandidate, price: Option<String>) -> Self {
        Self {
            domain: candidate.domain(),
            price,
            sld: candidate.sld().to_string(),
            tld: candidate.tld().to_string(),
        }
    }
}
