use anyhow::{Context, Result};
use tracing::Level;

/// Install the global `tracing` subscriber
///
/// Events go to stderr so stdout stays free for metadata output. Fails when a
/// global subscriber is already set.
pub fn init(verbose: bool) -> Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
            .with_writer(std::io::stderr)
            .finish(),
    )
    .context("Could not set up global logging subscriber")
}
