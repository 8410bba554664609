//! Structured logging module using tracing
//!
//! Console (stderr) plus an append-only log file, filtered by the `-v` count.

use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod legacy;

pub use legacy::{
    set_verbosity, shorten_file_path_internal, verbosity, write_structured_log_with_verbosity,
};
#[cfg(target_os = "macos")]
pub use legacy::write_structured_log;

/// Map the `-v` count (0-3) to a tracing filter directive.
pub fn filter_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        // -v shows debug1! lines, which are emitted at info.
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing with console and optional file output
pub fn init_tracing(verbosity: u8, log_file_path: Option<PathBuf>) {
    // Command-line verbosity wins; RUST_LOG is ignored on purpose.
    let filter = EnvFilter::new(filter_for_verbosity(verbosity));

    let registry = tracing_subscriber::registry().with(filter);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    let file = log_file_path.and_then(|log_path| {
        if let Some(parent) = log_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok()
    });

    match file {
        Some(file) => {
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(false);

            registry.with(console_layer).with(file_layer).init();
        }
        None => registry.with(console_layer).init(),
    }
}
