use tracing_subscriber::{fmt, EnvFilter};

use crate::stderr_buffer::BufferedStderr;

/// Install the global log subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug output for
/// `--verbose`. Lines go through [`crate::stderr_buffer`] so they are held
/// back while the TUI owns the terminal.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "cijfer=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(false)
        .with_writer(|| BufferedStderr)
        .try_init();
}
