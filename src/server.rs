//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, reseller selection, the event
//! worker and the Axum server lifecycle.

use crate::application::services::{
    NonceService, PermissionGate, PurchaseService, PurchaseSettings,
};
use crate::config::{Config, ResellerKind};
use crate::domain::reseller::Reseller;
use crate::infrastructure::cache::{CacheService, MemoryCache, RedisCache};
use crate::infrastructure::events::{ChannelEventSink, WebhookNotifier, run_event_worker};
use crate::infrastructure::persistence::PgMappingRepository;
use crate::infrastructure::reseller::SandboxReseller;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How often expired entries are swept from the in-process cache.
const MEMORY_CACHE_PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or in-process fallback)
/// - Reseller
/// - Background event worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The sandbox price list is malformed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let cache = build_cache(&config).await;
    let reseller = build_reseller(&config)?;

    let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);
    let notifier = config
        .domain_added_webhook_url
        .as_ref()
        .map(WebhookNotifier::new);
    tokio::spawn(run_event_worker(event_rx, notifier));
    tracing::info!("Event worker started");

    let event_sink = Arc::new(ChannelEventSink::new(event_tx));
    let repository = Arc::new(PgMappingRepository::new(Arc::new(pool)));

    let purchase_service = Arc::new(PurchaseService::new(
        repository,
        reseller,
        cache.clone(),
        event_sink.clone(),
        PurchaseSettings {
            check_ttl: Duration::from_secs(config.check_cache_ttl_seconds),
            allow_multi_domain: config.allow_multi_domain,
        },
    ));

    let nonces = Arc::new(NonceService::new(
        config.nonce_secret.clone(),
        Duration::from_secs(config.nonce_lifetime_seconds),
    ));

    let state = AppState {
        purchase_service,
        permission_gate: Arc::new(PermissionGate::new(nonces)),
        cache,
        event_sink,
        public_base_url: config.public_base_url()?,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Connects to Redis when configured, otherwise (or on failure) falls back
/// to an in-process cache swept by a background task.
async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using MemoryCache.", e);
            }
        }
    } else {
        tracing::info!("Redis not configured, using MemoryCache");
    }

    let memory = Arc::new(MemoryCache::new());
    let sweeper = memory.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MEMORY_CACHE_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sweeper.purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "Purged expired cache entries");
            }
        }
    });

    memory
}

fn build_reseller(config: &Config) -> Result<Option<Arc<dyn Reseller>>> {
    match config.reseller {
        ResellerKind::None => {
            tracing::warn!("No reseller configured: purchase actions will fail");
            Ok(None)
        }
        ResellerKind::Sandbox => {
            let prices = SandboxReseller::parse_prices(&config.sandbox_tld_prices)
                .map_err(anyhow::Error::msg)
                .context("SANDBOX_TLD_PRICES is invalid")?;
            let sandbox = SandboxReseller::new(prices);
            tracing::info!(
                tlds = ?sandbox.tlds().collect::<Vec<_>>(),
                "Sandbox reseller enabled"
            );
            let reseller: Arc<dyn Reseller> = Arc::new(sandbox);
            Ok(Some(reseller))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
