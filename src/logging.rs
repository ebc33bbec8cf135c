//! File logging setup.
//!
//! The TUI owns stdout and stderr while the alternate screen is active, so
//! tracing output goes to a daily-rolling file under the user cache
//! directory instead.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Initialize tracing. The returned guard must stay alive for the lifetime
/// of the process; `None` means logging is disabled or has nowhere to write.
pub fn init(config: &AppConfig) -> Option<WorkerGuard> {
    if !config.log_enabled() {
        return None;
    }

    let dir = dirs::cache_dir()?.join("fb-tui").join("logs");
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }

    let file = tracing_appender::rolling::daily(dir, "fb-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(file);

    // RUST_LOG wins over the config level when set.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Some(guard)
}
