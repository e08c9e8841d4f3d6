//! Headless arena client binary.
//!
//! Loads arena content, runs one bot match between an authority and its
//! observers, and logs the result.
//!
//! # Examples
//!
//! ```bash
//! RUST_LOG=debug ARENA_SCORE_LIMIT=3 cargo run -p arena-client
//! ```

use anyhow::Result;
use arena_client::{ArenaConfig, run_match};
use game_content::ContentFactory;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ArenaConfig::from_env();
    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };

    tracing::info!("Loading content from {}", factory.data_dir().display());
    let content = factory.load_all()?;

    let summary = run_match(&config, content)?;

    match summary.winner {
        Some((winner, kills)) => {
            tracing::info!("Winner: {} with {} kills after {} ticks", winner, kills, summary.ticks)
        }
        None => tracing::info!("No winner after {} ticks", summary.ticks),
    }
    tracing::info!(
        "Events: {}, packets: {}, remote requests: {}, observers in sync: {}",
        summary.events,
        summary.link.packets_forwarded,
        summary.link.requests_forwarded,
        summary.observers_in_sync
    );
    Ok(())
}
