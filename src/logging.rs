//! Logging setup for Pax Construct
//!
//! Diagnostics go through `tracing` and are written to stderr. `RUST_LOG`
//! takes precedence over the level chosen on the command line.

use std::sync::Once;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Logging options taken from the command line
#[derive(Debug, Clone, Copy)]
pub struct LoggingConfig {
    /// Minimum level when `RUST_LOG` is not set
    pub level: Level,
    /// Colour output; only honoured when stderr is a terminal
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    pub fn from_verbosity(verbose: bool) -> Self {
        Self {
            level: if verbose { Level::DEBUG } else { Level::INFO },
            ..Self::default()
        }
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str().to_ascii_lowercase()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi && console::colors_enabled_stderr())
            .with_target(false)
            .without_time()
            .try_init();
    });
}
