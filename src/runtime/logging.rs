use std::error::Error;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Send `tracing` output to a daily-rolling `nexus.log`.
///
/// The terminal belongs to the UI, so nothing goes to stdout or stderr.
/// `RUST_LOG` overrides `logging.level`. The returned guard must outlive the
/// event loop or buffered lines are lost.
pub fn init_logging(settings: &Settings) -> Result<Option<WorkerGuard>, Box<dyn Error>> {
    let Some(log_dir) = settings.log_dir() else {
        return Ok(None);
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "nexus.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))?;

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Some(guard))
}
