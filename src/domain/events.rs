//! Domain events published after state changes.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Something other parts of the platform may react to (DNS setup, mail, audit).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A domain was mapped onto a site.
    DomainAdded {
        domain: String,
        site_id: i64,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    pub fn domain_added(domain: impl Into<String>, site_id: i64) -> Self {
        DomainEvent::DomainAdded {
            domain: domain.into(),
            site_id,
            occurred_at: Utc::now(),
        }
    }
}

/// Receiver side of domain events.
///
/// Publishing never fails the caller: implementations log and drop what they
/// cannot deliver.
///
/// # Implementations
///
/// - [`crate::infrastructure::events::ChannelEventSink`] - Hands events to [`crate::infrastructure::events::run_event_worker`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait DomainEventSink: Send + Sync {
    fn publish(&self, event: DomainEvent);
}
