//! Video request board client
//!
//! Runs the board against the configured API with a terminal surface and
//! commands read from stdin.

mod console;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use console::{ConsoleSurface, StdinEvents};
use video_request_client::{Config, ControllerOptions, HttpRequestStore, ViewController};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting video request client");
    tracing::info!("API base URL: {}", config.api_base_url);
    tracing::info!("Search debounce: {:?}", config.search_debounce);

    if config.discard_stale_responses {
        tracing::info!("Stale list responses will be discarded");
    }

    let store = Arc::new(HttpRequestStore::new(&config)?);
    let surface = Arc::new(ConsoleSurface::new());
    let controller = ViewController::new(
        store,
        surface.clone(),
        ControllerOptions::from(&config),
    );

    println!("{}", console::HELP);
    controller.run(StdinEvents::new(surface)).await;

    Ok(())
}
