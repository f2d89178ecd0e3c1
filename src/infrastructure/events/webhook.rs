//! Webhook delivery for domain events.

use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::events::DomainEvent;

/// Delivery attempts after the first one.
const MAX_RETRIES: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook delivery failed with status {0}")]
    Status(u16),
}

/// POSTs events as JSON to a configured URL.
///
/// Server errors and transport failures are retried with jittered exponential
/// backoff; client errors (4xx) are not.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Delivers one event, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Returns the last [`WebhookError`] once retries are exhausted or the
    /// endpoint rejected the payload.
    pub async fn notify(&self, event: &DomainEvent) -> Result<(), WebhookError> {
        let strategy = ExponentialBackoff::from_millis(200)
            .max_delay(Duration::from_secs(10))
            .map(jitter)
            .take(MAX_RETRIES);

        Retry::spawn(strategy, || self.send_once(event)).await
    }

    async fn send_once(&self, event: &DomainEvent) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(event).send().await?;
        let status = response.status();

        if status.is_success() {
            debug!(url = %self.url, "Webhook delivered");
            return Ok(());
        }

        if status.is_client_error() {
            // 4xx: not retried.
            warn!(url = %self.url, status = status.as_u16(), "Webhook rejected event");
            return Ok(());
        }

        Err(WebhookError::Status(status.as_u16()))
    }
}
