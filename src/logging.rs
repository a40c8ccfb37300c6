//! Tracing subscriber setup for binaries and tests that use this crate.
//!
//! The library itself only emits `tracing` events; nothing is printed until a
//! subscriber is installed, for example with [`init`].

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::fs_op::error::{FsOpError, Result};
use crate::settings::LogSettings;

/// Install a global subscriber: stderr output, plus a log file when
/// `settings.directory` is set. `RUST_LOG` takes precedence over
/// `settings.level`. Records emitted through the `log` crate are forwarded.
///
/// Keep the returned guard alive for as long as file logging should flush.
/// Fails if a global subscriber is already installed.
pub fn init(settings: &LogSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| FsOpError::Logging(e.to_string()))?;

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    let (file_layer, guard) = match &settings.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| FsOpError::Logging(e.to_string()))?;

    // Already installed by someone else is fine; tracing still works.
    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::debug!("log bridge not installed: {}", e);
    }
    Ok(guard)
}
