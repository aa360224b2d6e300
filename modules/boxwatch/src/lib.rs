pub mod api;
pub mod config;
pub mod error;
pub mod sink;
pub mod watcher;

pub use api::EventsApi;
pub use config::Config;
pub use error::WatchError;
pub use sink::{EventSink, LogSink};
pub use watcher::{CycleOutcome, Watcher};
