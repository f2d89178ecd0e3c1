//! Purchase orders and their outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::mapping::Mapping;

/// A payment card brand accepted by the reseller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardType {
    pub code: String,
    pub label: String,
}

impl CardType {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Card data entered in the purchase form.
#[derive(Clone, Default)]
pub struct BillingCard {
    pub card_type: String,
    pub number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub cvv2: String,
    pub cardholder: String,
}

impl fmt::Debug for BillingCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last4: String = self
            .number
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        f.debug_struct("BillingCard")
            .field("card_type", &self.card_type)
            .field("number", &format_args!("****{last4}"))
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("cvv2", &"***")
            .field("cardholder", &self.cardholder)
            .finish()
    }
}

/// Contact data of the domain registrant.
#[derive(Debug, Clone, Default)]
pub struct Registrant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Everything the reseller needs to register a domain.
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrder {
    pub sld: String,
    pub tld: String,
    pub card: BillingCard,
    pub registrant: Registrant,
}

impl PurchaseOrder {
    pub fn domain(&self) -> String {
        format!("{}.{}", self.sld, self.tld)
    }
}

/// Why a purchased domain was not attached to the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotMappedReason {
    SiteAlreadyMapped,
    DomainClaimed,
    StorageFailed,
}

/// Result of a successful purchase.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    Mapped(Mapping),
    PurchasedNotMapped {
        domain: String,
        reason: NotMappedReason,
    },
}

impl PurchaseOutcome {
    pub fn domain(&self) -> &str {
        match self {
            PurchaseOutcome::Mapped(mapping) => &mapping.domain,
            PurchaseOutcome::PurchasedNotMapped { domain, .. } => domain,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, PurchaseOutcome::Mapped(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_debug_masks_sensitive_fields() {
        let card = BillingCard {
            card_type: "visa".to_string(),
            number: "4111111111111111".to_string(),
            expiration_month: "12".to_string(),
            expiration_year: "2030".to_string(),
            cvv2: "123".to_string(),
            cardholder: "Jane Doe".to_string(),
        };

        let debug = format!("{card:?}");

        assert!(debug.contains("****1111"));
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_outcome_domain() {
        let outcome = PurchaseOutcome::PurchasedNotMapped {
            domain: "example.com".to_string(),
            reason: NotMappedReason::SiteAlreadyMapped,
        };

        assert_eq!(outcome.domain(), "example.com");
        assert!(!outcome.is_mapped());
    }
}
