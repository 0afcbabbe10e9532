//! Configuration for the replicr binary
//!
//! The sync core takes its inputs as plain arguments; this module only
//! exists for the CLI, which reads a small JSON config file:
//!
//! ```json
//! {
//!     "src": "/data/projects",
//!     "replica": "/backup/projects",
//!     "interval": 5,
//!     "log": "/var/log/replicr.log",
//!     "buffer_size": 4096
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::MirrorError;

/// Default copy/fingerprint chunk size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Mirror job configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Source directory to mirror from
	pub src: PathBuf,

	/// Replica directory to mirror onto (created if absent)
	pub replica: PathBuf,

	/// Minutes to sleep between sync passes
	pub interval: u64,

	/// Log file path; stderr when unset
	pub log: Option<PathBuf>,

	/// Chunk size for fingerprinting and copying, in bytes
	pub buffer_size: usize,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			src: PathBuf::from("."),
			replica: PathBuf::new(),
			interval: 1,
			log: None,
			buffer_size: DEFAULT_BUFFER_SIZE,
		}
	}
}

impl Config {
	/// Load configuration from a JSON file.
	pub fn load(path: &Path) -> Result<Config, MirrorError> {
		let buf = fs::read_to_string(path).map_err(|e| MirrorError::InvalidConfig {
			message: format!("cannot read {}: {}", path.display(), e),
		})?;
		let config: Config = serde_json::from_str(&buf).map_err(|e| {
			MirrorError::InvalidConfig { message: format!("cannot parse {}: {}", path.display(), e) }
		})?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), MirrorError> {
		if self.replica.as_os_str().is_empty() {
			return Err(MirrorError::InvalidConfig { message: "replica path is required".into() });
		}
		if self.buffer_size == 0 {
			return Err(MirrorError::InvalidConfig {
				message: "buffer_size must be positive".into(),
			});
		}
		Ok(())
	}
}


// vim: ts=4
