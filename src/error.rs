//! Error types for mirror operations

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for mirror operations
#[derive(Debug)]
pub enum MirrorError {
	/// Copying a single file failed
	CopyFailed { src: PathBuf, dest: PathBuf, source: io::Error },

	/// Persisting or clearing a transfer checkpoint failed
	CheckpointFailed { path: PathBuf, source: io::Error },

	/// Traversing a directory failed
	WalkFailed { path: PathBuf, source: io::Error },

	/// Removing a stale replica entry failed
	RemoveFailed { path: PathBuf, source: io::Error },

	/// Invalid configuration
	InvalidConfig { message: String },

	/// I/O error without more specific context
	Io(io::Error),
}

impl fmt::Display for MirrorError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MirrorError::CopyFailed { src, dest, source } => {
				write!(f, "Failed to copy {} to {}: {}", src.display(), dest.display(), source)
			}
			MirrorError::CheckpointFailed { path, source } => {
				write!(f, "Checkpoint operation failed for {}: {}", path.display(), source)
			}
			MirrorError::WalkFailed { path, source } => {
				write!(f, "Failed to traverse {}: {}", path.display(), source)
			}
			MirrorError::RemoveFailed { path, source } => {
				write!(f, "Failed to remove {}: {}", path.display(), source)
			}
			MirrorError::InvalidConfig { message } => {
				write!(f, "Invalid configuration: {}", message)
			}
			MirrorError::Io(e) => write!(f, "I/O error: {}", e),
		}
	}
}

impl Error for MirrorError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			MirrorError::CopyFailed { source, .. } => Some(source),
			MirrorError::CheckpointFailed { source, .. } => Some(source),
			MirrorError::WalkFailed { source, .. } => Some(source),
			MirrorError::RemoveFailed { source, .. } => Some(source),
			MirrorError::InvalidConfig { .. } => None,
			MirrorError::Io(e) => Some(e),
		}
	}
}

impl From<io::Error> for MirrorError {
	fn from(e: io::Error) -> Self {
		MirrorError::Io(e)
	}
}

impl From<String> for MirrorError {
	fn from(e: String) -> Self {
		MirrorError::InvalidConfig { message: e }
	}
}

// vim: ts=4
