use crate::consts;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Standard output carries the game display, so messages go to `log_file`
/// if given and to standard error otherwise.  The filter is read from
/// `TTYSNAKE_LOG` and defaults to `warn`.
pub(crate) fn init(log_file: Option<&Path>) {
    let filter =
        EnvFilter::try_from_env(consts::LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    match log_file.map(open_log) {
        Some(Ok(file)) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        Some(Err(e)) => {
            builder.with_writer(io::stderr).init();
            error!(error = %e, "Failed to open log file; logging to stderr instead");
        }
        None => builder.with_writer(io::stderr).init(),
    }
}

fn open_log(path: &Path) -> io::Result<fs_err::File> {
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}
