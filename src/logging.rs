//! Dual-sink logging setup.
//!
//! The reference implementation attaches both a `FileHandler('log')` and a
//! `StreamHandler()` to the same logger instance, so every line goes to
//! stdout and to a file named `log` in the current directory. This
//! installs the equivalent pair of `tracing-subscriber` `fmt` layers, one
//! writing to stdout and one to a non-blocking file writer from
//! `tracing-appender`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the dual-sink subscriber. Hold on to the returned
/// [`WorkerGuard`] for the life of the process — dropping it early stops
/// the file sink's background writer thread and buffered lines are lost.
pub fn init(verbose: bool) -> WorkerGuard {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_writer = tracing_appender::rolling::never(".", "log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_writer);

    let stdout_layer = fmt::layer();
    let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
