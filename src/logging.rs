//! Logging prelude module for convenient access to tracing macros.
//!
//! The sync core only emits events through these macros; installing the
//! subscriber is the job of whoever drives the sync loop (the `replicr`
//! binary, or a test harness), never of the core itself.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

pub use tracing::{debug, error, info, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// By default, logs at INFO level and above are displayed. Control the log
/// level with the `RUST_LOG` environment variable:
///
/// ```bash
/// RUST_LOG=debug replicr --src a --replica b
/// RUST_LOG=replicr::replicate=trace replicr --config sync.json
/// ```
///
/// With `log_file` set, log lines are appended to that file instead of
/// stderr (the file is created if missing).
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), io::Error> {
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

	match log_file {
		Some(path) => {
			let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
			tracing_subscriber::fmt()
				.with_env_filter(filter)
				.with_writer(Arc::new(file))
				.with_ansi(false)
				.init();
		}
		None => {
			tracing_subscriber::fmt()
				.with_env_filter(filter)
				.with_writer(std::io::stderr)
				.init();
		}
	}
	Ok(())
}

// vim: ts=4
