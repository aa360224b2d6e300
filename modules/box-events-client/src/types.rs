use std::fmt;

use serde::Deserialize;

/// Opaque server-issued checkpoint into the event stream. Never interpreted
/// client-side; only ever replaced by a server-supplied successor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct StreamPosition(String);

impl StreamPosition {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StreamPosition {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StreamPosition {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for StreamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the `stream_position=now` bootstrap fetch.
#[derive(Debug, Deserialize)]
pub struct PositionBootstrap {
    pub next_stream_position: StreamPosition,
}

/// OPTIONS response listing realtime endpoints. Box returns at least one;
/// the first entry is the one to use.
#[derive(Debug, Deserialize)]
pub struct PollEndpoints {
    #[serde(default)]
    pub entries: Vec<PollEndpoint>,
}

/// A short-lived capability URL for one long-poll wait. Resolved fresh
/// before every wait and never reused.
#[derive(Debug, Clone, Deserialize)]
pub struct PollEndpoint {
    pub url: String,
}

/// Raw long-poll response body.
#[derive(Debug, Deserialize)]
pub struct LongPollReply {
    pub message: String,
}

/// Outcome of a long-poll wait, mapped from the wire `message` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage {
    /// Events are available since the tracked position.
    Changed,
    /// The capability URL expired; resolve a new one.
    Reconnect,
    /// Anything unrecognized. Treated like a reconnect for safety.
    Unknown,
}

impl ServerMessage {
    pub fn from_wire(message: &str) -> Self {
        match message {
            "new_change" => ServerMessage::Changed,
            "reconnect" => ServerMessage::Reconnect,
            _ => ServerMessage::Unknown,
        }
    }
}

/// Wire shape of the event fetch envelope. `next_stream_position` can be
/// absent on a 200 response; that makes the envelope unusable.
#[derive(Debug, Deserialize)]
pub struct EventPage {
    pub next_stream_position: Option<StreamPosition>,
    #[serde(default)]
    pub entries: Vec<Event>,
}

impl EventPage {
    /// Validate the envelope. `None` means the position it carries is
    /// unusable and the caller should re-bootstrap.
    pub fn into_batch(self) -> Option<EventBatch> {
        let next_position = self.next_stream_position?;
        Some(EventBatch {
            next_position,
            entries: self.entries,
        })
    }
}

/// A validated fetch result: the authoritative next position plus the
/// events that occurred, in server order. `entries` may be empty; the
/// position still advances.
#[derive(Debug)]
pub struct EventBatch {
    pub next_position: StreamPosition,
    pub entries: Vec<Event>,
}

/// A single occurrence in the event stream. Extra wire fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub event_type: String,
}
