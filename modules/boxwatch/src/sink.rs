use std::sync::Arc;

use async_trait::async_trait;
use box_events_client::Event;
use tracing::info;

/// Destination for dispatched events. Called once per entry, in the order
/// the server returned them.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn dispatch(&self, event: &Event);
}

#[async_trait]
impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    async fn dispatch(&self, event: &Event) {
        (**self).dispatch(event).await;
    }
}

/// Sink that surfaces each event on the log as `event_id | event_type`.
pub struct LogSink;

#[async_trait]
impl EventSink for LogSink {
    async fn dispatch(&self, event: &Event) {
        info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            "{} | {}",
            event.event_id,
            event.event_type
        );
    }
}
