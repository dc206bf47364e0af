//! Log output for faultline
//!
//! Installs a `tracing-subscriber` registry that writes to stderr, keeping
//! stdout free for command output.

use faultline_config::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when the configured one does not parse
pub const FALLBACK_FILTER: &str = "info";

/// Build the event filter for a directive
///
/// An invalid directive falls back to [`FALLBACK_FILTER`] instead of
/// refusing to start.
pub fn filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter `{directive}`, using `{FALLBACK_FILTER}`: {e}");
        EnvFilter::new(FALLBACK_FILTER)
    })
}

/// Initialize logging from configuration
///
/// `filter_override` takes precedence over `config.filter`, which is how the
/// command line flag wins over the config file.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &LogConfig, filter_override: Option<&str>) -> anyhow::Result<()> {
    let filter = filter(filter_override.unwrap_or(&config.filter));

    let result = match config.format {
        LogFormat::Text => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);

            tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(false);

            tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()
        }
    };

    result.map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}
