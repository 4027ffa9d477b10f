// Tracing setup: logs go to a file so stdout stays clean for JSON output.

use anyhow::Context;
use std::path::Path;

use prospector_core::config::LoggingConfig;

pub const LOG_FILE: &str = "prospector.log";

/// Filter directive for a `-v` count; zero keeps the configured default.
pub fn filter_directive(config: &LoggingConfig, verbosity: u8) -> String {
    match verbosity {
        0 => config.filter.clone(),
        1 => "prospector=debug,info".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize tracing to log to `<base_dir>/<logging.dir>/prospector.log`.
/// `RUST_LOG` wins over the configured filter when no `-v` is given.
pub fn init_tracing(config: &LoggingConfig, base_dir: &Path, verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join(&config.dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join(LOG_FILE))?;

    let directive = filter_directive(config, verbosity);
    let filter = if verbosity == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive))
    } else {
        EnvFilter::new(&directive)
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
