pub mod error;
pub mod query;
pub mod types;

pub use error::{BoxError, Result};
pub use types::{
    Event, EventBatch, EventPage, LongPollReply, PollEndpoint, ServerMessage, StreamPosition,
};

use std::time::Duration;

use query::append_query_params;
use types::{PollEndpoints, PositionBootstrap};

pub struct BoxEventsClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl BoxEventsClient {
    /// Build a client for the configured events URL. A connect timeout is
    /// applied but no total request timeout: the server holds long-poll
    /// responses open for tens of seconds and must not be cut short locally.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            token: token.to_string(),
        })
    }

    /// Fetch the current stream position via `stream_position=now`.
    pub async fn current_position(&self) -> Result<StreamPosition> {
        let url = append_query_params(&self.base_url, &[("stream_position", "now")]);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BoxError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bootstrap: PositionBootstrap = resp.json().await?;
        Ok(bootstrap.next_stream_position)
    }

    /// Resolve a fresh long-poll capability URL. The server invalidates
    /// these between waits, so the result is never cached.
    pub async fn poll_endpoint(&self) -> Result<PollEndpoint> {
        let resp = self
            .client
            .request(reqwest::Method::OPTIONS, &self.base_url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BoxError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let endpoints: PollEndpoints = resp.json().await?;
        endpoints
            .entries
            .into_iter()
            .next()
            .ok_or(BoxError::NoPollEndpoint)
    }

    /// Block on a capability URL until the server reports activity or asks
    /// for a reconnect. Deliberately unauthenticated: the URL is already
    /// scoped by the resolver step and the server rejects a bearer token here.
    pub async fn long_poll(&self, endpoint: &PollEndpoint) -> Result<ServerMessage> {
        let resp = self.client.get(&endpoint.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BoxError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: LongPollReply = resp.json().await?;
        Ok(ServerMessage::from_wire(&reply.message))
    }

    /// Fetch events that occurred since `position`. `Ok(None)` means the
    /// server answered 200 but the envelope was unusable; callers should
    /// re-bootstrap their position rather than retry with the same value.
    pub async fn events_since(&self, position: &StreamPosition) -> Result<Option<EventBatch>> {
        let url = append_query_params(&self.base_url, &[("stream_position", position.as_str())]);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BoxError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let page: EventPage = match serde_json::from_str(&body) {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(error = %err, "Event envelope unparseable");
                return Ok(None);
            }
        };

        match page.into_batch() {
            Some(batch) => Ok(Some(batch)),
            None => {
                tracing::warn!("Event envelope missing next_stream_position");
                Ok(None)
            }
        }
    }
}
