use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::{FilmRouteError, Result};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("filmroute={}", config.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    result.map_err(|e| FilmRouteError::config(format!("logger init failed: {e}")))
}
