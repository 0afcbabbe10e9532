//! Two-pass tree reconciliation
//!
//! Pass 1 walks the source tree and propagates every directory and file into
//! the replica. Pass 2 walks the replica tree and prunes everything that has
//! no source counterpart. Pass 1 always runs to completion before pass 2
//! starts, so a file renamed between two sync cycles is copied to its new
//! path before the old path is deleted.
//!
//! Every directory and file is handled independently: a failure is logged,
//! counted, and the walk moves on. Only an unusable source root aborts the
//! whole invocation (the scheduler retries on the next cycle).

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use crate::checkpoint::META_SUFFIX;
use crate::error::MirrorError;
use crate::logging::*;
use crate::remove;
use crate::replicate::{self, CopyOutcome};

/// Summary of one completed sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
	/// Files written or rewritten in the replica
	pub files_copied: usize,

	/// Files whose digests already matched
	pub files_unchanged: usize,

	/// Replica directories created
	pub folders_created: usize,

	/// Stale files and directories removed from the replica
	pub entries_removed: usize,

	/// Per-entry failures that were logged and skipped
	pub errors: usize,
}

/// Mirror `src_root` onto `replica_root`.
///
/// `replica_root` is created if absent. Returns `Err` only when the source
/// root itself cannot be traversed; per-entry failures are reflected in
/// `SyncStats::errors`.
pub fn sync(
	src_root: &Path,
	replica_root: &Path,
	chunk_size: usize,
) -> Result<SyncStats, MirrorError> {
	// Structural check up front: without a readable source root neither
	// pass can make a meaningful decision
	fs::read_dir(src_root)
		.map_err(|e| MirrorError::WalkFailed { path: src_root.to_path_buf(), source: e })?;

	let mut stats = SyncStats::default();
	propagate(src_root, replica_root, chunk_size, &mut stats);
	prune(src_root, replica_root, &mut stats);
	Ok(stats)
}

/// Pass 1: create replica directories and replicate files, depth-first.
fn propagate(src_dir: &Path, replica_dir: &Path, chunk_size: usize, stats: &mut SyncStats) {
	if !replica_dir.is_dir() {
		info!("Creating folder {}", replica_dir.display());
		if let Err(e) = fs::create_dir_all(replica_dir) {
			error!("Error creating folder {}: {}", replica_dir.display(), e);
			stats.errors += 1;
			return;
		}
		stats.folders_created += 1;
	}

	let entries = match fs::read_dir(src_dir) {
		Ok(entries) => entries,
		Err(e) => {
			error!("Error reading folder {}: {}", src_dir.display(), e);
			stats.errors += 1;
			return;
		}
	};

	for entry in entries {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				error!("Error reading entry in {}: {}", src_dir.display(), e);
				stats.errors += 1;
				continue;
			}
		};

		let src_path = entry.path();
		let replica_path = replica_dir.join(entry.file_name());

		let file_type = match entry.file_type() {
			Ok(t) => t,
			Err(e) => {
				error!("Error inspecting {}: {}", src_path.display(), e);
				stats.errors += 1;
				continue;
			}
		};

		if file_type.is_dir() {
			propagate(&src_path, &replica_path, chunk_size, stats);
		} else if file_type.is_file() {
			match replicate::replicate(&src_path, &replica_path, chunk_size) {
				Ok(CopyOutcome::Copied { .. }) => stats.files_copied += 1,
				Ok(CopyOutcome::Unchanged) => stats.files_unchanged += 1,
				Err(e) => {
					error!("{}", e);
					stats.errors += 1;
				}
			}
		} else {
			// Symlinks and special files are out of scope for mirroring
			debug!("Skipping non-regular file {}", src_path.display());
		}
	}
}

/// Pass 2: delete replica entries with no source counterpart, depth-first.
fn prune(src_dir: &Path, replica_dir: &Path, stats: &mut SyncStats) {
	let entries = match fs::read_dir(replica_dir) {
		Ok(entries) => entries,
		Err(e) => {
			error!("Error reading folder {}: {}", replica_dir.display(), e);
			stats.errors += 1;
			return;
		}
	};

	for entry in entries {
		let entry = match entry {
			Ok(entry) => entry,
			Err(e) => {
				error!("Error reading entry in {}: {}", replica_dir.display(), e);
				stats.errors += 1;
				continue;
			}
		};

		let replica_path = entry.path();
		let name = entry.file_name();
		let src_path = src_dir.join(&name);

		let is_dir = match entry.file_type() {
			Ok(t) => t.is_dir(),
			Err(e) => {
				error!("Error inspecting {}: {}", replica_path.display(), e);
				stats.errors += 1;
				continue;
			}
		};

		if is_dir {
			if src_path.is_dir() {
				prune(&src_path, &replica_path, stats);
			} else {
				remove_entry(&replica_path, stats);
			}
		} else if !src_path.is_file() && !is_live_sidecar(src_dir, &name) {
			remove_entry(&replica_path, stats);
		}
	}
}

/// A checkpoint sidecar is kept only while the file it tracks still has a
/// source counterpart; otherwise it is as stale as its file and gets pruned
/// with it.
fn is_live_sidecar(src_dir: &Path, name: &OsStr) -> bool {
	let name = match name.to_str() {
		Some(name) => name,
		None => return false,
	};
	match name.strip_suffix(META_SUFFIX) {
		Some(base) if !base.is_empty() => src_dir.join(base).is_file(),
		_ => false,
	}
}

fn remove_entry(path: &Path, stats: &mut SyncStats) {
	match remove::remove(path) {
		Ok(()) => stats.entries_removed += 1,
		Err(e) => {
			error!("{}", e);
			stats.errors += 1;
		}
	}
}


// vim: ts=4
