use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use box_events_client::BoxEventsClient;
use boxwatch::config::Config;
use boxwatch::sink::LogSink;
use boxwatch::watcher::Watcher;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("boxwatch=info".parse()?))
        .init();

    info!("Boxwatch starting...");

    // Load config
    let path = Config::resolve_path(std::env::args().nth(1));
    let config = Config::load(&path)?;
    config.log_redacted();

    let client = BoxEventsClient::new(&config.base_url, &config.bearer)?;

    // Runs until externally terminated
    let mut watcher = Watcher::new(client, LogSink);
    watcher.run().await;

    Ok(())
}
