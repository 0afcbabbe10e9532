//! Content fingerprinting
//!
//! A file's identity for mirroring purposes is its content digest, never its
//! size or timestamps. The digest is computed by streaming the file through a
//! BLAKE3 hasher in fixed-size chunks, so arbitrarily large files are hashed
//! in constant memory.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::logging::*;

/// 128-bit content fingerprint of a file's byte stream.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Digest([u8; 16]);

impl Digest {
	pub fn as_bytes(&self) -> &[u8; 16] {
		&self.0
	}
}

impl std::fmt::Display for Digest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", hex::encode(self.0))
	}
}

/// Compute the content digest of the file at `path`, reading it in
/// `chunk_size` blocks.
///
/// Returns `None` if the file cannot be opened or read. An absent digest is
/// not comparable to anything, so callers treat it as "not equal", which
/// forces a copy attempt rather than aborting the pass.
pub fn fingerprint(path: &Path, chunk_size: usize) -> Option<Digest> {
	let mut file = match fs::File::open(path) {
		Ok(f) => f,
		Err(e) => {
			error!("Error fingerprinting {}: {}", path.display(), e);
			return None;
		}
	};

	let mut hasher = blake3::Hasher::new();
	let mut buf = vec![0u8; chunk_size];
	loop {
		match file.read(&mut buf) {
			Ok(0) => break,
			Ok(n) => {
				hasher.update(&buf[..n]);
			}
			Err(e) => {
				error!("Error fingerprinting {}: {}", path.display(), e);
				return None;
			}
		}
	}

	let mut out = [0u8; 16];
	hasher.finalize_xof().fill(&mut out);
	Some(Digest(out))
}


// vim: ts=4
