//! Background task draining the domain event queue.

use tokio::sync::mpsc;
use tracing::{error, info};

use super::webhook::WebhookNotifier;
use crate::domain::events::DomainEvent;

/// Processes domain events until every sender is dropped.
///
/// Each event is logged and counted; when a [`WebhookNotifier`] is configured
/// the event is forwarded to it. Delivery failures are logged and never stop
/// the worker.
pub async fn run_event_worker(
    mut rx: mpsc::Receiver<DomainEvent>,
    notifier: Option<WebhookNotifier>,
) {
    while let Some(event) = rx.recv().await {
        match &event {
            DomainEvent::DomainAdded {
                domain, site_id, ..
            } => {
                info!(%domain, site_id, "Domain added");
                metrics::counter!("domains_added_total").increment(1);
            }
        }

        if let Some(notifier) = &notifier
            && let Err(e) = notifier.notify(&event).await
        {
            metrics::counter!("domain_event_webhook_failures_total").increment(1);
            error!(url = notifier.url(), "Webhook delivery failed: {}", e);
        }
    }

    info!("Event worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_worker_exits_when_senders_drop() {
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(run_event_worker(rx, None));

        tx.send(DomainEvent::domain_added("example.com", 1))
            .await
            .unwrap();
        drop(tx);

        handle.await.unwrap();
    }
}
