use box_events_client::BoxError;
use thiserror::Error;

/// Per-phase failures of one polling cycle. Every variant is retryable:
/// the outer loop logs it and restarts the cycle from the top.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Failed to fetch current stream position: {0}")]
    PositionFetch(BoxError),

    #[error("Failed to resolve long-poll endpoint: {0}")]
    EndpointResolution(BoxError),

    #[error("Long-poll wait failed: {0}")]
    LongPoll(BoxError),

    #[error("Event fetch failed: {0}")]
    EventFetch(BoxError),
}
