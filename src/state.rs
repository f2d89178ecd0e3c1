//! Shared application state injected into every handler.

use std::sync::Arc;
use url::Url;

use crate::application::services::{PermissionGate, PurchaseService};
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::events::ChannelEventSink;
use crate::infrastructure::persistence::PgMappingRepository;

#[derive(Clone)]
pub struct AppState {
    pub purchase_service: Arc<PurchaseService<PgMappingRepository>>,
    pub permission_gate: Arc<PermissionGate>,
    /// Same cache the purchase service uses; kept here for health checks.
    pub cache: Arc<dyn CacheService>,
    pub event_sink: Arc<ChannelEventSink>,
    /// Base of the absolute links rendered into fragments.
    pub public_base_url: Url,
}
