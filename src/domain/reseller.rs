//! Contract of the domain reseller the purchase flow delegates to.

use async_trait::async_trait;

use crate::domain::entities::{CardType, PurchaseOrder};

/// Errors reported by a reseller backend.
#[derive(Debug, thiserror::Error)]
pub enum ResellerError {
    #[error("reseller request failed: {0}")]
    Request(String),

    #[error("tld '{0}' is not offered by the reseller")]
    UnsupportedTld(String),
}

/// A registrar/reseller account able to price and register domains.
///
/// # Implementations
///
/// - [`crate::infrastructure::reseller::SandboxReseller`] - Configured price list, no real registration
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Reseller: Send + Sync {
    /// Short identifier used in logs and health output.
    fn name(&self) -> &'static str;

    /// Whether `sld.tld` can be registered.
    async fn check_domain(&self, tld: &str, sld: &str) -> Result<bool, ResellerError>;

    /// Yearly registration price for the TLD, in dollars.
    async fn get_tld_price(&self, tld: &str) -> Result<f64, ResellerError>;

    /// Payment card brands accepted at checkout.
    async fn get_card_types(&self) -> Result<Vec<CardType>, ResellerError>;

    /// Registers the ordered domain.
    ///
    /// Returns the registered domain name, or `None` when the reseller
    /// declined the purchase.
    async fn purchase(&self, order: &PurchaseOrder) -> Result<Option<String>, ResellerError>;
}
