//! Logging setup: console plus `logs/choice_tracker.log`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_NAME: &str = "choice_tracker.log";

/// Keeps the file writer alive. Dropping it flushes pending log lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(logs_dir: &Path, default_level: &str) -> Result<LoggingGuard> {
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("creating log directory at {}", logs_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = ChronoLocal::new("%H:%M:%S%.3f".to_string());

    let console = fmt::layer().with_timer(timer.clone()).with_target(false);
    let file = fmt::layer()
        .with_timer(timer)
        .with_ansi(false)
        .with_writer(writer);

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init();

    Ok(LoggingGuard { _guard: guard })
}

/// Routes panics into the log before the default hook runs.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        tracing::error!("[PANIC]{} {}", location, msg);
        default_hook(panic_info);
    }));
}
