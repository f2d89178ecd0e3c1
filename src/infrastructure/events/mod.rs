//! Delivery of domain events.
//!
//! Handlers publish through [`ChannelEventSink`]; a background task started
//! with [`run_event_worker`] drains the queue, logs every event, records a
//! metric and optionally forwards it to a webhook.

mod channel_sink;
mod webhook;
mod worker;

pub use channel_sink::ChannelEventSink;
pub use webhook::{WebhookError, WebhookNotifier};
pub use worker::run_event_worker;
