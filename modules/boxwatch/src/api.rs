// Trait seam between the watcher and the Box events API, in the spirit of
// the content-fetcher abstractions elsewhere in this workspace: the watcher
// loop is tested against in-memory implementations, no network.

use std::sync::Arc;

use async_trait::async_trait;
use box_events_client::{
    BoxEventsClient, EventBatch, PollEndpoint, Result, ServerMessage, StreamPosition,
};

#[async_trait]
pub trait EventsApi: Send + Sync {
    /// Fetch the current stream position (`stream_position=now`).
    async fn current_position(&self) -> Result<StreamPosition>;

    /// Resolve a fresh long-poll capability URL.
    async fn poll_endpoint(&self) -> Result<PollEndpoint>;

    /// Block until the server reports activity on the endpoint.
    async fn long_poll(&self, endpoint: &PollEndpoint) -> Result<ServerMessage>;

    /// Fetch events since `position`. `None` means the envelope was
    /// unusable and the position should be re-bootstrapped.
    async fn events_since(&self, position: &StreamPosition) -> Result<Option<EventBatch>>;
}

#[async_trait]
impl EventsApi for BoxEventsClient {
    async fn current_position(&self) -> Result<StreamPosition> {
        BoxEventsClient::current_position(self).await
    }

    async fn poll_endpoint(&self) -> Result<PollEndpoint> {
        BoxEventsClient::poll_endpoint(self).await
    }

    async fn long_poll(&self, endpoint: &PollEndpoint) -> Result<ServerMessage> {
        BoxEventsClient::long_poll(self, endpoint).await
    }

    async fn events_since(&self, position: &StreamPosition) -> Result<Option<EventBatch>> {
        BoxEventsClient::events_since(self, position).await
    }
}

#[async_trait]
impl<A: EventsApi + ?Sized> EventsApi for Arc<A> {
    async fn current_position(&self) -> Result<StreamPosition> {
        (**self).current_position().await
    }

    async fn poll_endpoint(&self) -> Result<PollEndpoint> {
        (**self).poll_endpoint().await
    }

    async fn long_poll(&self, endpoint: &PollEndpoint) -> Result<ServerMessage> {
        (**self).long_poll(endpoint).await
    }

    async fn events_since(&self, position: &StreamPosition) -> Result<Option<EventBatch>> {
        (**self).events_since(position).await
    }
}
