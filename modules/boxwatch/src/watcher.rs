use std::time::Duration;

use box_events_client::{ServerMessage, StreamPosition};
use tracing::{debug, error, info, warn};

use crate::api::EventsApi;
use crate::error::WatchError;
use crate::sink::EventSink;

/// Delay before restarting after one failed cycle. Doubles per consecutive
/// failure up to MAX_RESTART_BACKOFF; any successful cycle resets it.
const RESTART_BACKOFF_BASE: Duration = Duration::from_secs(1);
const MAX_RESTART_BACKOFF: Duration = Duration::from_secs(60);

/// What one pass through the polling cycle did.
#[derive(Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Server reported a change; this many events were dispatched and the
    /// tracked position advanced.
    Dispatched(usize),
    /// Server asked for a fresh capability URL. Position untouched.
    Reconnect,
    /// Unrecognized long-poll message; handled like a reconnect.
    UnknownMessage,
    /// Event envelope was unusable; position was reset for re-bootstrap.
    PositionReset,
}

/// The polling state machine. Owns the tracked stream position exclusively;
/// exactly one cycle is in flight at a time, so no locking is needed. Run
/// one instance per watched stream.
pub struct Watcher<A, S> {
    api: A,
    sink: S,
    position: Option<StreamPosition>,
}

impl<A: EventsApi, S: EventSink> Watcher<A, S> {
    pub fn new(api: A, sink: S) -> Self {
        Self {
            api,
            sink,
            position: None,
        }
    }

    /// Currently tracked position, if bootstrapped.
    pub fn position(&self) -> Option<&StreamPosition> {
        self.position.as_ref()
    }

    /// Idempotent bootstrap: hits the network only when no position is
    /// tracked, otherwise returns the held value.
    async fn ensure_position(&mut self) -> Result<StreamPosition, WatchError> {
        if let Some(position) = &self.position {
            return Ok(position.clone());
        }

        let position = self
            .api
            .current_position()
            .await
            .map_err(WatchError::PositionFetch)?;
        info!(position = %position, "Bootstrapped stream position");
        self.position = Some(position.clone());
        Ok(position)
    }

    /// One full pass: ensure position, resolve a fresh endpoint, wait, and
    /// on a change fetch-and-dispatch. Any error aborts the pass; the outer
    /// loop restarts from the top.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, WatchError> {
        let position = self.ensure_position().await?;

        let endpoint = self
            .api
            .poll_endpoint()
            .await
            .map_err(WatchError::EndpointResolution)?;
        debug!(url = %endpoint.url, "Long polling");

        let message = self
            .api
            .long_poll(&endpoint)
            .await
            .map_err(WatchError::LongPoll)?;

        match message {
            ServerMessage::Changed => self.fetch_and_dispatch(&position).await,
            ServerMessage::Reconnect => {
                debug!("Server requested reconnect");
                Ok(CycleOutcome::Reconnect)
            }
            ServerMessage::Unknown => {
                warn!("Unknown long-poll message, restarting cycle");
                Ok(CycleOutcome::UnknownMessage)
            }
        }
    }

    async fn fetch_and_dispatch(
        &mut self,
        position: &StreamPosition,
    ) -> Result<CycleOutcome, WatchError> {
        let batch = match self
            .api
            .events_since(position)
            .await
            .map_err(WatchError::EventFetch)?
        {
            Some(batch) => batch,
            None => {
                // Unusable envelope: drop the stale position entirely so the
                // next cycle re-bootstraps with stream_position=now.
                warn!("Event envelope unusable, resetting stream position");
                self.position = None;
                return Ok(CycleOutcome::PositionReset);
            }
        };

        let count = batch.entries.len();
        for event in &batch.entries {
            self.sink.dispatch(event).await;
        }

        // An empty batch still advances the position; re-fetching the same
        // window would spin forever.
        self.position = Some(batch.next_position);
        Ok(CycleOutcome::Dispatched(count))
    }

    /// Drive cycles forever. Failures are logged and the cycle restarts
    /// from the top with exponential backoff; there is no terminal state in
    /// normal operation.
    pub async fn run(&mut self) {
        let mut consecutive_failures: u32 = 0;
        loop {
            match self.run_cycle().await {
                Ok(outcome) => {
                    consecutive_failures = 0;
                    if let CycleOutcome::Dispatched(count) = outcome {
                        info!(count, position = ?self.position, "Cycle complete");
                    }
                }
                Err(err) => {
                    let backoff = restart_backoff(consecutive_failures);
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    error!(
                        error = %err,
                        backoff_secs = backoff.as_secs(),
                        "Cycle failed, restarting"
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

fn restart_backoff(consecutive_failures: u32) -> Duration {
    let doubling = consecutive_failures.min(6);
    let backoff = RESTART_BACKOFF_BASE * 2u32.pow(doubling);
    backoff.min(MAX_RESTART_BACKOFF)
}
