//! Transfer checkpoint store
//!
//! An in-progress copy records how many bytes have already been written to
//! the destination in a small JSON sidecar next to it (`<dest>.meta`). The
//! sidecar survives process restarts, so an interrupted transfer resumes
//! from the last durable offset instead of starting over. The destination
//! file itself never carries any bookkeeping: its bytes are always exactly
//! replicated content.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MirrorError;
use crate::logging::*;

/// Suffix appended to the destination path to derive the sidecar path.
pub const META_SUFFIX: &str = ".meta";

/// On-disk checkpoint record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
	pub bytes_transferred: u64,
}

/// Sidecar path for a destination file.
pub fn meta_path(dest: &Path) -> PathBuf {
	let mut os = dest.as_os_str().to_os_string();
	os.push(META_SUFFIX);
	PathBuf::from(os)
}

/// Read the checkpointed byte count for `dest`.
///
/// A missing sidecar means the transfer never started; an unparsable one
/// means a crash tore it mid-write. Both collapse to 0: the store cannot
/// tell the cases apart, and restarting from scratch is always safe, just
/// slower.
pub fn read(dest: &Path) -> u64 {
	let meta = meta_path(dest);
	let buf = match fs::read(&meta) {
		Ok(buf) => buf,
		Err(_) => return 0,
	};
	match serde_json::from_slice::<Checkpoint>(&buf) {
		Ok(cp) => cp.bytes_transferred,
		Err(e) => {
			warn!("Unparsable checkpoint {}, restarting from 0: {}", meta.display(), e);
			0
		}
	}
}

/// Persist the checkpointed byte count for `dest`, flushed to disk before
/// returning.
pub fn write(dest: &Path, bytes_transferred: u64) -> Result<(), MirrorError> {
	let meta = meta_path(dest);
	let record = Checkpoint { bytes_transferred };
	let encoded = serde_json::to_vec(&record)
		.map_err(|e| MirrorError::CheckpointFailed { path: meta.clone(), source: e.into() })?;

	let io = |e| MirrorError::CheckpointFailed { path: meta.clone(), source: e };
	let mut file = fs::File::create(&meta).map_err(io)?;
	file.write_all(&encoded).map_err(io)?;
	file.sync_all().map_err(io)?;
	Ok(())
}

/// Remove the checkpoint for `dest` after a completed transfer. A sidecar
/// that is already gone counts as success.
pub fn clear(dest: &Path) -> Result<(), MirrorError> {
	let meta = meta_path(dest);
	match fs::remove_file(&meta) {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
		Err(e) => Err(MirrorError::CheckpointFailed { path: meta, source: e }),
	}
}


// vim: ts=4
