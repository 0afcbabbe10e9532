//! Stale entry removal

use std::fs;
use std::path::Path;

use crate::error::MirrorError;
use crate::logging::*;

/// Delete `path`: a directory is removed recursively, anything else is
/// unlinked. The caller decides whether a failure aborts anything; during
/// pruning it never does.
pub fn remove(path: &Path) -> Result<(), MirrorError> {
	let result = if path.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) };

	match result {
		Ok(()) => {
			info!("Removed {}", path.display());
			Ok(())
		}
		Err(e) => Err(MirrorError::RemoveFailed { path: path.to_path_buf(), source: e }),
	}
}


// vim: ts=4
