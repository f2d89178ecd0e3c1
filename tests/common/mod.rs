#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum_test::TestRequest;
use sqlx::PgPool;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

use domain_purchase::application::services::{
    NonceService, PermissionGate, PurchaseService, PurchaseSettings,
};
use domain_purchase::domain::action::AjaxAction;
use domain_purchase::domain::entities::{CardType, PurchaseOrder};
use domain_purchase::domain::events::DomainEvent;
use domain_purchase::domain::reseller::{Reseller, ResellerError};
use domain_purchase::infrastructure::cache::MemoryCache;
use domain_purchase::infrastructure::events::ChannelEventSink;
use domain_purchase::infrastructure::persistence::PgMappingRepository;
use domain_purchase::state::AppState;

pub const NONCE_SECRET: &str = "test-nonce-secret";
pub const BASE_URL: &str = "https://sites.example.org";
pub const USER_ID: i64 = 5;

/// Reseller with a fixed price per TLD and a set of taken domains.
///
/// Records every purchase so tests can assert on what reached the reseller.
pub struct FakeReseller {
    pub price: f64,
    pub taken: HashSet<String>,
    /// What `purchase` returns; `None` declines every purchase.
    pub purchase_result: Option<String>,
    pub purchases: Mutex<Vec<String>>,
}

impl FakeReseller {
    pub fn new(price: f64) -> Self {
        Self {
            price,
            taken: HashSet::new(),
            purchase_result: None,
            purchases: Mutex::new(Vec::new()),
        }
    }

    pub fn with_taken(mut self, domain: &str) -> Self {
        self.taken.insert(domain.to_string());
        self
    }

    pub fn selling(mut self, domain: &str) -> Self {
        self.purchase_result = Some(domain.to_string());
        self
    }

    pub fn purchase_count(&self) -> usize {
        self.purchases.lock().unwrap().len()
    }
}

#[async_trait]
impl Reseller for FakeReseller {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn check_domain(&self, tld: &str, sld: &str) -> Result<bool, ResellerError> {
        Ok(!self.taken.contains(&format!("{sld}.{tld}")))
    }

    async fn get_tld_price(&self, _tld: &str) -> Result<f64, ResellerError> {
        Ok(self.price)
    }

    async fn get_card_types(&self) -> Result<Vec<CardType>, ResellerError> {
        Ok(vec![
            CardType::new("visa", "Visa"),
            CardType::new("mastercard", "MasterCard"),
        ])
    }

    async fn purchase(&self, order: &PurchaseOrder) -> Result<Option<String>, ResellerError> {
        self.purchases.lock().unwrap().push(order.domain());
        Ok(self.purchase_result.clone())
    }
}

pub async fn create_test_site(pool: &PgPool, domain: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO sites (domain, path) VALUES ($1, '/') RETURNING id")
        .bind(domain)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_mapping(pool: &PgPool, site_id: i64, domain: &str) {
    sqlx::query("INSERT INTO domain_mappings (site_id, domain, active) VALUES ($1, $2, TRUE)")
        .bind(site_id)
        .bind(domain)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn count_mappings(pool: &PgPool, domain: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM domain_mappings WHERE domain = $1")
        .bind(domain)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(
    pool: PgPool,
    reseller: Option<Arc<dyn Reseller>>,
) -> (AppState, mpsc::Receiver<DomainEvent>) {
    create_test_state_with(pool, reseller, PurchaseSettings::default())
}

pub fn create_test_state_with(
    pool: PgPool,
    reseller: Option<Arc<dyn Reseller>>,
    settings: PurchaseSettings,
) -> (AppState, mpsc::Receiver<DomainEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let cache = Arc::new(MemoryCache::new());
    let event_sink = Arc::new(ChannelEventSink::new(tx));
    let repository = Arc::new(PgMappingRepository::new(Arc::new(pool)));

    let purchase_service = Arc::new(PurchaseService::new(
        repository,
        reseller,
        cache.clone(),
        event_sink.clone(),
        settings,
    ));

    let state = AppState {
        purchase_service,
        permission_gate: Arc::new(PermissionGate::new(Arc::new(nonce_service()))),
        cache,
        event_sink,
        public_base_url: Url::parse(BASE_URL).unwrap(),
    };

    (state, rx)
}

pub fn nonce_service() -> NonceService {
    NonceService::new(NONCE_SECRET.to_string(), Duration::from_secs(86_400))
}

pub fn nonce(action: AjaxAction, user_id: i64) -> String {
    nonce_service().create(action, user_id)
}

/// Adds the headers the host platform sends for a domain manager.
pub fn as_manager(request: TestRequest, user_id: i64, site_id: i64) -> TestRequest {
    request
        .add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_str(&user_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-site-id"),
            HeaderValue::from_str(&site_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-user-first-name"),
            HeaderValue::from_static("Jane"),
        )
        .add_header(
            HeaderName::from_static("x-user-last-name"),
            HeaderValue::from_static("Doe"),
        )
        .add_header(
            HeaderName::from_static("x-user-capabilities"),
            HeaderValue::from_static("read,manage_domains"),
        )
}

/// Adds identity headers of a user without the `manage_domains` capability.
pub fn as_reader(request: TestRequest, user_id: i64, site_id: i64) -> TestRequest {
    request
        .add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_str(&user_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-site-id"),
            HeaderValue::from_str(&site_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-user-capabilities"),
            HeaderValue::from_static("read"),
        )
}
