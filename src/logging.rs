//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured level. Output goes to the
//! given writer so the CLI can keep stdout for its result line.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Initializes the global tracing subscriber.
///
/// # Returns
/// * `Result<()>` - Success or error if a subscriber is already installed
pub fn init<W>(config: &LoggingConfig, writer: W) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_level(true)
        .with_writer(writer);

    match config.format {
        LogFormat::Json => builder.json().with_ansi(false).try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    }
}
