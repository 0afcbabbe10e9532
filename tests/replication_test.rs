//! File replicator tests - staleness detection, resumable copies, checkpoint
//! repair after simulated crashes.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use replicr::checkpoint;
use replicr::replicate::{replicate, CopyOutcome};

const CHUNK: usize = 4096;

fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
	let dir = TempDir::new().unwrap();
	let src = dir.path().join("src.txt");
	let dest = dir.path().join("dest.txt");
	(dir, src, dest)
}

fn read(path: &Path) -> Vec<u8> {
	fs::read(path).unwrap()
}

#[test]
fn test_fresh_copy() {
	let (_dir, src, dest) = setup();
	fs::write(&src, b"Hello, world!").unwrap();

	let outcome = replicate(&src, &dest, CHUNK).unwrap();

	assert_eq!(outcome, CopyOutcome::Copied { bytes: 13 });
	assert_eq!(read(&dest), b"Hello, world!");
	assert!(!checkpoint::meta_path(&dest).exists(), "checkpoint must be cleared on completion");
}

#[test]
fn test_identical_files_are_noop() {
	let (_dir, src, dest) = setup();
	fs::write(&src, b"same content").unwrap();
	fs::write(&dest, b"same content").unwrap();

	let outcome = replicate(&src, &dest, CHUNK).unwrap();
	assert_eq!(outcome, CopyOutcome::Unchanged);
}

#[test]
fn test_changed_content_is_recopied() {
	let (_dir, src, dest) = setup();
	fs::write(&src, b"new content").unwrap();
	fs::write(&dest, b"old content, and longer than the new one").unwrap();

	let outcome = replicate(&src, &dest, CHUNK).unwrap();

	assert_eq!(outcome, CopyOutcome::Copied { bytes: 11 });
	assert_eq!(read(&dest), b"new content");
}

#[test]
fn test_same_size_different_content_is_recopied() {
	// Identity is the digest, never the length
	let (_dir, src, dest) = setup();
	fs::write(&src, b"aaaa").unwrap();
	fs::write(&dest, b"bbbb").unwrap();

	replicate(&src, &dest, CHUNK).unwrap();
	assert_eq!(read(&dest), b"aaaa");
}

#[test]
fn test_resume_copies_only_remaining_bytes() {
	let (_dir, src, dest) = setup();
	let content: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
	fs::write(&src, &content).unwrap();

	// Simulate a crash after the first 7000 bytes were written and
	// checkpointed
	fs::write(&dest, &content[..7000]).unwrap();
	checkpoint::write(&dest, 7000).unwrap();

	let outcome = replicate(&src, &dest, CHUNK).unwrap();

	assert_eq!(outcome, CopyOutcome::Copied { bytes: 13_000 });
	assert_eq!(read(&dest), content);
	assert!(!checkpoint::meta_path(&dest).exists());
}

#[test]
fn test_resume_discards_torn_tail_beyond_checkpoint() {
	let (_dir, src, dest) = setup();
	let content: Vec<u8> = (0..10_000u32).map(|i| (i % 13) as u8).collect();
	fs::write(&src, &content).unwrap();

	// Crash between data write and checkpoint write: destination holds
	// 6000 bytes but only 5000 are checkpointed, and the tail is garbage
	let mut torn = content[..5000].to_vec();
	torn.extend_from_slice(&[0xff; 1000]);
	fs::write(&dest, &torn).unwrap();
	checkpoint::write(&dest, 5000).unwrap();

	replicate(&src, &dest, CHUNK).unwrap();
	assert_eq!(read(&dest), content);
}

#[test]
fn test_resume_with_checkpoint_ahead_of_disk() {
	let (_dir, src, dest) = setup();
	let content: Vec<u8> = (0..8000u32).map(|i| (i % 7) as u8).collect();
	fs::write(&src, &content).unwrap();

	// Checkpoint claims more than ever reached the disk
	fs::write(&dest, &content[..3000]).unwrap();
	checkpoint::write(&dest, 6000).unwrap();

	replicate(&src, &dest, CHUNK).unwrap();
	assert_eq!(read(&dest), content);
}

#[test]
fn test_resume_restarts_when_source_shrank_below_checkpoint() {
	let (_dir, src, dest) = setup();
	fs::write(&src, b"short now").unwrap();

	// A previous run copied 5000 bytes of a since-replaced larger source
	fs::write(&dest, vec![0x55u8; 5000]).unwrap();
	checkpoint::write(&dest, 5000).unwrap();

	replicate(&src, &dest, CHUNK).unwrap();

	assert_eq!(read(&dest), b"short now");
	assert!(!checkpoint::meta_path(&dest).exists());
}

#[test]
fn test_corrupt_checkpoint_restarts_from_scratch() {
	let (_dir, src, dest) = setup();
	fs::write(&src, b"Hello, world!").unwrap();
	fs::write(&dest, b"Hello").unwrap();
	fs::write(checkpoint::meta_path(&dest), b"{not json").unwrap();

	replicate(&src, &dest, CHUNK).unwrap();
	assert_eq!(read(&dest), b"Hello, world!");
}

#[test]
fn test_stray_checkpoint_cleared_on_unchanged_file() {
	let (_dir, src, dest) = setup();
	fs::write(&src, b"settled").unwrap();
	fs::write(&dest, b"settled").unwrap();
	checkpoint::write(&dest, 3).unwrap();

	let outcome = replicate(&src, &dest, CHUNK).unwrap();

	assert_eq!(outcome, CopyOutcome::Unchanged);
	assert!(!checkpoint::meta_path(&dest).exists());
}

#[test]
fn test_missing_source_is_error() {
	let (_dir, src, dest) = setup();
	fs::write(&dest, b"orphan").unwrap();

	assert!(replicate(&src, &dest, CHUNK).is_err());
	// Destination content is untouched by the failed attempt
	assert_eq!(read(&dest), b"orphan");
}

#[test]
fn test_small_chunk_size_copies_correctly() {
	let (_dir, src, dest) = setup();
	let content: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
	fs::write(&src, &content).unwrap();

	let outcome = replicate(&src, &dest, 16).unwrap();

	assert_eq!(outcome, CopyOutcome::Copied { bytes: 1000 });
	assert_eq!(read(&dest), content);
}

// vim: ts=4
