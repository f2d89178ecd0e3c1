//! Event sink backed by a bounded Tokio channel.

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::events::{DomainEvent, DomainEventSink};

/// Queues events for the background worker without blocking the request.
///
/// A full or closed queue drops the event with a warning.
#[derive(Clone)]
pub struct ChannelEventSink {
    sender: mpsc::Sender<DomainEvent>,
}

impl ChannelEventSink {
    pub fn new(sender: mpsc::Sender<DomainEvent>) -> Self {
        Self { sender }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Remaining queue slots.
    pub fn capacity(&self) -> usize {
        self.sender.capacity()
    }
}

impl DomainEventSink for ChannelEventSink {
    fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.sender.try_send(event) {
            match e {
                mpsc::error::TrySendError::Full(ev) => {
                    metrics::counter!("domain_events_dropped_total", "reason" => "full").increment(1);
                    warn!(?ev, "Event queue is full, dropping event");
                }
                mpsc::error::TrySendError::Closed(ev) => {
                    metrics::counter!("domain_events_dropped_total", "reason" => "closed")
                        .increment(1);
                    warn!(?ev, "Event queue is closed, dropping event");
                }
            }
        }
    }
}
