// src/log.rs
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber. Binaries call this once; the library only
/// emits events. `verbose` raises this crate to `debug`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let base = if verbose {
            join!(DEFAULT_FILTER, ",gushi_scrape=debug")
        } else {
            s!(DEFAULT_FILTER)
        };
        EnvFilter::new(base)
    });

    // A second init (tests, embedding apps) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
