//! A reseller that prices from a fixed table and registers nothing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::entities::{CardType, PurchaseOrder};
use crate::domain::reseller::{Reseller, ResellerError};

/// Sandbox reseller for development and staging.
///
/// - A domain is available when its TLD has a price and it has not been
///   "purchased" from this instance before
/// - Purchases succeed for available domains with a non-empty card number
///   and return the ordered domain
pub struct SandboxReseller {
    prices: HashMap<String, f64>,
    registered: RwLock<HashSet<String>>,
}

impl SandboxReseller {
    pub fn new(prices: HashMap<String, f64>) -> Self {
        let prices = prices
            .into_iter()
            .map(|(tld, price)| (tld.trim().to_lowercase(), price))
            .collect();

        Self {
            prices,
            registered: RwLock::new(HashSet::new()),
        }
    }

    /// Parses a `com=12.50,net=9.99` price list.
    ///
    /// # Errors
    ///
    /// Returns a description of the first malformed entry.
    pub fn parse_prices(list: &str) -> Result<HashMap<String, f64>, String> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (tld, price) = entry
                    .split_once('=')
                    .ok_or_else(|| format!("expected 'tld=price', got '{entry}'"))?;
                let tld = tld.trim().trim_start_matches('.').to_lowercase();
                let price: f64 = price
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid price in '{entry}'"))?;
                if tld.is_empty() || !price.is_finite() || price < 0.0 {
                    return Err(format!("invalid entry '{entry}'"));
                }
                Ok((tld, price))
            })
            .collect()
    }

    pub fn tlds(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }
}

#[async_trait]
impl Reseller for SandboxReseller {
    fn name(&self) -> &'static str {
        "sandbox"
    }

    async fn check_domain(&self, tld: &str, sld: &str) -> Result<bool, ResellerError> {
        if !self.prices.contains_key(tld) {
            return Ok(false);
        }
        let domain = format!("{sld}.{tld}");
        Ok(!self.registered.read().await.contains(&domain))
    }

    async fn get_tld_price(&self, tld: &str) -> Result<f64, ResellerError> {
        self.prices
            .get(tld)
            .copied()
            .ok_or_else(|| ResellerError::UnsupportedTld(tld.to_string()))
    }

    async fn get_card_types(&self) -> Result<Vec<CardType>, ResellerError> {
        Ok(vec![
            CardType::new("visa", "Visa"),
            CardType::new("mastercard", "MasterCard"),
            CardType::new("amex", "American Express"),
            CardType::new("discover", "Discover"),
        ])
    }

    async fn purchase(&self, order: &PurchaseOrder) -> Result<Option<String>, ResellerError> {
        if order.card.number.is_empty() || !self.prices.contains_key(&order.tld) {
            return Ok(None);
        }

        let domain = order.domain();
        if !self.registered.write().await.insert(domain.clone()) {
            return Ok(None);
        }

        info!(%domain, "Sandbox purchase completed");
        Ok(Some(domain))
    }
}
