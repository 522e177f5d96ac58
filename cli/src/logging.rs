//! Tracing initialisation for the CLI.

use flashdecode_analytics::LogConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Call once, at startup.
///
/// `RUST_LOG` wins over the config; `verbose` raises the default level to
/// `debug`. Logs go to stderr so stdout stays machine-readable.
pub fn init(config: &LogConfig, verbose: bool) {
    let mut config = config.clone();
    if verbose {
        config.level = "debug".into();
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directives()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer().with_writer(std::io::stderr);
    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .init();
    }
}
