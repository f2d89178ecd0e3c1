//! Domain availability, purchase form and purchase orchestration.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::domain::countries::{Country, countries};
use crate::domain::entities::{
    CardType, DomainCandidate, DomainCheck, MapOutcome, NewMapping, NotMappedReason,
    PurchaseOrder, PurchaseOutcome, RequestContext,
};
use crate::domain::events::{DomainEvent, DomainEventSink};
use crate::domain::repositories::MappingRepository;
use crate::domain::reseller::Reseller;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::currency::format_price;

/// Message returned when the candidate domain fails validation.
pub const INVALID_DOMAIN_MESSAGE: &str = "Domain name is invalid.";

/// How long a check result stays usable for the purchase form.
pub const DEFAULT_CHECK_TTL: Duration = Duration::from_secs(3600);

/// Tunables of the purchase flow.
#[derive(Debug, Clone)]
pub struct PurchaseSettings {
    /// Lifetime of the cached availability check.
    pub check_ttl: Duration,
    /// Lets a site hold more than one mapped domain.
    pub allow_multi_domain: bool,
}

impl Default for PurchaseSettings {
    fn default() -> Self {
        Self {
            check_ttl: DEFAULT_CHECK_TTL,
            allow_multi_domain: false,
        }
    }
}

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub check: DomainCheck,
    pub available: bool,
}

/// Everything needed to render the purchase form.
#[derive(Debug, Clone)]
pub struct PurchaseForm {
    pub check: DomainCheck,
    pub card_types: Vec<CardType>,
    pub cardholder: String,
    pub countries: &'static [Country],
}

/// Service behind the three purchase actions.
///
/// Collaborators:
/// - an optional [`Reseller`]; every operation fails as unavailable without one
/// - a [`CacheService`] holding each user's last availability check
/// - a [`MappingRepository`] applying the mapping rule
/// - a [`DomainEventSink`] told about new mappings
pub struct PurchaseService<R: MappingRepository> {
    repository: Arc<R>,
    reseller: Option<Arc<dyn Reseller>>,
    cache: Arc<dyn CacheService>,
    events: Arc<dyn DomainEventSink>,
    settings: PurchaseSettings,
}

impl<R: MappingRepository> PurchaseService<R> {
    /// Creates a new purchase service.
    pub fn new(
        repository: Arc<R>,
        reseller: Option<Arc<dyn Reseller>>,
        cache: Arc<dyn CacheService>,
        events: Arc<dyn DomainEventSink>,
        settings: PurchaseSettings,
    ) -> Self {
        Self {
            repository,
            reseller,
            cache,
            events,
            settings,
        }
    }

    /// Name of the configured reseller, if any.
    pub fn reseller_name(&self) -> Option<&'static str> {
        self.reseller.as_ref().map(|r| r.name())
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn cache(&self) -> &dyn CacheService {
        self.cache.as_ref()
    }

    /// Cache key of a user's availability check.
    pub fn check_cache_key(user_id: i64) -> String {
        format!("domainmap-{}-checkdomain", user_id)
    }

    fn reseller(&self) -> Result<&Arc<dyn Reseller>, AppError> {
        self.reseller
            .as_ref()
            .ok_or_else(|| AppError::unavailable("No reseller configured", json!({})))
    }

    /// Checks whether `sld.tld` can be bought and at what price.
    ///
    /// The result, available or not, replaces the user's cached check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with [`INVALID_DOMAIN_MESSAGE`] if the
    /// domain is malformed; the reseller is not contacted in that case.
    /// Returns [`AppError::Unavailable`] if no reseller is configured or it fails.
    /// Returns [`AppError::Internal`] if the result cannot be cached.
    pub async fn check_domain(
        &self,
        ctx: &RequestContext,
        sld: &str,
        tld: &str,
    ) -> Result<CheckOutcome, AppError> {
        let candidate = DomainCandidate::parse(sld, tld).map_err(|e| {
            AppError::bad_request(
                INVALID_DOMAIN_MESSAGE,
                json!({ "sld": sld, "tld": tld, "reason": e.to_string() }),
            )
        })?;

        let reseller = self.reseller()?;

        let available = reseller
            .check_domain(candidate.tld(), candidate.sld())
            .await?;

        let price = if available {
            Some(format_price(reseller.get_tld_price(candidate.tld()).await?))
        } else {
            None
        };

        let check = DomainCheck::new(&candidate, price);
        self.cache
            .set(
                &Self::check_cache_key(ctx.user_id),
                &serde_json::to_string(&check)?,
                self.settings.check_ttl,
            )
            .await?;

        info!(
            domain = %check.domain,
            available,
            user_id = ctx.user_id,
            "Domain availability checked"
        );

        Ok(CheckOutcome { check, available })
    }

    /// Loads the user's cached check, if it is still there.
    ///
    /// An entry that no longer deserializes counts as missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the cache backend fails.
    pub async fn cached_check(&self, user_id: i64) -> Result<Option<DomainCheck>, AppError> {
        let Some(raw) = self.cache.get(&Self::check_cache_key(user_id)).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(check) => Ok(Some(check)),
            Err(e) => {
                warn!(user_id, "Discarding unreadable cached check: {}", e);
                Ok(None)
            }
        }
    }

    /// Collects the data of the purchase form for the user's last check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if no reseller is configured, the
    /// user has no live cached check, or the reseller fails.
    pub async fn get_purchase_form(&self, ctx: &RequestContext) -> Result<PurchaseForm, AppError> {
        let reseller = self.reseller()?;

        let check = self.cached_check(ctx.user_id).await?.ok_or_else(|| {
            AppError::unavailable(
                "No availability check in cache",
                json!({ "user_id": ctx.user_id }),
            )
        })?;

        let card_types = reseller.get_card_types().await?;

        Ok(PurchaseForm {
            check,
            card_types,
            cardholder: ctx.cardholder(),
            countries: countries(),
        })
    }

    /// Buys the ordered domain and maps it onto the current site.
    ///
    /// A purchase that succeeded is reported as success even when the
    /// mapping was skipped or failed; the outcome says which.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if no reseller is configured, the
    /// reseller fails, or it declines the purchase.
    pub async fn purchase_domain(
        &self,
        ctx: &RequestContext,
        order: PurchaseOrder,
    ) -> Result<PurchaseOutcome, AppError> {
        let reseller = self.reseller()?;

        let purchased = reseller
            .purchase(&order)
            .await?
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty());

        let Some(domain) = purchased else {
            metrics::counter!("domain_purchases_total", "result" => "declined").increment(1);
            return Err(AppError::unavailable(
                "Purchase declined by reseller",
                json!({ "domain": order.domain(), "site_id": ctx.site_id }),
            ));
        };

        info!(%domain, site_id = ctx.site_id, user_id = ctx.user_id, "Domain purchased");
        metrics::counter!("domain_purchases_total", "result" => "purchased").increment(1);

        Ok(self.map_domain(ctx.site_id, domain).await)
    }

    /// Attaches a purchased domain to a site if the mapping rule allows it.
    ///
    /// Publishes [`DomainEvent::DomainAdded`] when a mapping was inserted.
    /// Storage errors are logged and reported as
    /// [`NotMappedReason::StorageFailed`].
    pub async fn map_domain(&self, site_id: i64, domain: String) -> PurchaseOutcome {
        let new_mapping = NewMapping {
            site_id,
            domain: domain.clone(),
        };

        let reason = match self
            .repository
            .insert_if_unclaimed(new_mapping, self.settings.allow_multi_domain)
            .await
        {
            Ok(MapOutcome::Inserted(mapping)) => {
                self.events
                    .publish(DomainEvent::domain_added(&mapping.domain, mapping.site_id));
                return PurchaseOutcome::Mapped(mapping);
            }
            Ok(MapOutcome::SiteAlreadyMapped) => NotMappedReason::SiteAlreadyMapped,
            Ok(MapOutcome::DomainClaimed) => NotMappedReason::DomainClaimed,
            Err(e) => {
                error!(%domain, site_id, "Failed to map purchased domain: {}", e);
                NotMappedReason::StorageFailed
            }
        };

        warn!(%domain, site_id, ?reason, "Purchased domain was not mapped");
        PurchaseOutcome::PurchasedNotMapped { domain, reason }
    }
}
