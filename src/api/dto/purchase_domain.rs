//! DTOs for the purchase endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    BillingCard, NotMappedReason, PurchaseOrder, PurchaseOutcome, Registrant,
};

/// Form body of `POST /ajax/purchase-domain`, as rendered by the purchase form.
#[derive(Deserialize)]
pub struct PurchaseDomainForm {
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub sld: String,
    #[serde(default)]
    pub tld: String,

    #[serde(default)]
    pub card_type: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub card_expiration_month: String,
    #[serde(default)]
    pub card_expiration_year: String,
    #[serde(default)]
    pub card_cvv2: String,
    #[serde(default)]
    pub card_cardholder: String,

    #[serde(default)]
    pub registrant_first_name: String,
    #[serde(default)]
    pub registrant_last_name: String,
    #[serde(default)]
    pub registrant_email: String,
    #[serde(default)]
    pub registrant_phone: String,
    #[serde(default)]
    pub registrant_address1: String,
    #[serde(default)]
    pub registrant_city: String,
    #[serde(default)]
    pub registrant_state: String,
    #[serde(default)]
    pub registrant_zip: String,
    #[serde(default)]
    pub registrant_country: String,
}

impl From<PurchaseDomainForm> for PurchaseOrder {
    fn from(form: PurchaseDomainForm) -> Self {
        PurchaseOrder {
            sld: form.sld.trim().to_lowercase(),
            tld: form.tld.trim().to_lowercase(),
            card: BillingCard {
                card_type: form.card_type,
                number: form.card_number.chars().filter(|c| !c.is_whitespace()).collect(),
                expiration_month: form.card_expiration_month,
                expiration_year: form.card_expiration_year,
                cvv2: form.card_cvv2,
                cardholder: form.card_cardholder.trim().to_string(),
            },
            registrant: Registrant {
                first_name: form.registrant_first_name,
                last_name: form.registrant_last_name,
                email: form.registrant_email,
                phone: form.registrant_phone,
                address1: form.registrant_address1,
                city: form.registrant_city,
                state: form.registrant_state,
                zip: form.registrant_zip,
                country: form.registrant_country,
            },
        }
    }
}

/// Success payload of a purchase.
///
/// `mapped: false` means the domain was bought but not attached to the site.
#[derive(Debug, Serialize)]
pub struct PurchaseDomainData {
    pub domain: String,
    pub mapped: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NotMappedReason>,
}

impl From<PurchaseOutcome> for PurchaseDomainData {
    fn from(outcome: PurchaseOutcome) -> Self {
        match outcome {
            PurchaseOutcome::Mapped(mapping) => Self {
                domain: mapping.domain,
                mapped: true,
                reason: None,
            },
            PurchaseOutcome::PurchasedNotMapped { domain, reason } => Self {
                domain,
                mapped: false,
                reason: Some(reason),
            },
        }
    }
}
