//! Resumable single-file replication
//!
//! `replicate` brings one destination file up to date with its source. Change
//! detection is purely content-based: the copy is skipped only when both
//! digests are present and equal. The copy itself is chunked, with the
//! checkpoint store persisting progress after every chunk, so a crash or I/O
//! failure mid-copy costs at most one chunk of rework on the next pass.

use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::checkpoint;
use crate::digest;
use crate::error::MirrorError;
use crate::logging::*;

/// What `replicate` did with the file pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
	/// Digests matched, nothing was written
	Unchanged,

	/// Destination was (re)written; `bytes` is what this invocation
	/// transferred, which is less than the file size on a resumed copy
	Copied { bytes: u64 },
}

/// Establish where the copy should resume from.
///
/// The stored checkpoint is only trusted as far as both files corroborate it:
/// a checkpoint beyond the destination's real length means the data write
/// never became durable, so the resume point falls back to what is actually
/// on disk; a checkpoint beyond the current source length means the source
/// changed under us, and the only safe resume point is 0.
fn resume_point(dest: &Path, src_len: u64, dest_len: u64) -> u64 {
	let mut start = checkpoint::read(dest);
	if start > dest_len {
		warn!(
			"Checkpoint for {} ahead of on-disk data ({} > {}), resuming from {}",
			dest.display(),
			start,
			dest_len,
			dest_len
		);
		start = dest_len;
	}
	if start > src_len {
		warn!("Source shrank below checkpoint for {}, restarting from 0", dest.display());
		start = 0;
	}
	start
}

/// Copy `src` to `dest` if their content differs, resuming a previously
/// interrupted transfer when a checkpoint exists.
///
/// The destination is truncated to the resume point before any byte is
/// appended, so the checkpoint always equals the length of valid replicated
/// data at the start of the destination file.
pub fn replicate(src: &Path, dest: &Path, chunk_size: usize) -> Result<CopyOutcome, MirrorError> {
	if dest.exists() {
		let src_digest = digest::fingerprint(src, chunk_size);
		let dest_digest = digest::fingerprint(dest, chunk_size);
		if src_digest.is_some() && src_digest == dest_digest {
			// In sync; drop any sidecar a dead run left behind
			checkpoint::clear(dest)?;
			return Ok(CopyOutcome::Unchanged);
		}
	}

	info!("Copying {} to {}", src.display(), dest.display());

	let copy_err =
		|e| MirrorError::CopyFailed { src: src.to_path_buf(), dest: dest.to_path_buf(), source: e };

	let mut src_file = fs::File::open(src).map_err(copy_err)?;
	let src_len = src_file.metadata().map_err(copy_err)?.len();
	let dest_len = fs::metadata(dest).map(|m| m.len()).unwrap_or(0);

	let mut start = resume_point(dest, src_len, dest_len);
	if start > 0 {
		info!("Resuming {} at byte {}", dest.display(), start);
	}

	src_file.seek(SeekFrom::Start(start)).map_err(copy_err)?;

	let mut dest_file =
		fs::OpenOptions::new().write(true).create(true).open(dest).map_err(copy_err)?;
	dest_file.set_len(start).map_err(copy_err)?;
	dest_file.seek(SeekFrom::Start(start)).map_err(copy_err)?;

	let mut transferred = 0u64;
	let mut buf = vec![0u8; chunk_size];
	loop {
		let n = src_file.read(&mut buf).map_err(copy_err)?;
		if n == 0 {
			break;
		}
		dest_file.write_all(&buf[..n]).map_err(copy_err)?;
		start += n as u64;
		transferred += n as u64;
		checkpoint::write(dest, start)?;
	}

	checkpoint::clear(dest)?;
	Ok(CopyOutcome::Copied { bytes: transferred })
}


// vim: ts=4
