//! # Replicr - One-Way Directory Mirror
//!
//! Replicr mirrors a source directory tree onto a replica directory tree:
//! entries present in the source are created or updated in the replica,
//! entries present only in the replica are deleted. Change detection is
//! content-based (streamed BLAKE3 digests, never timestamps), and file
//! copies are chunked and checkpointed so an interrupted transfer resumes
//! where it left off after a crash.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use replicr::reconcile::sync;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stats = sync("./data".as_ref(), "./backup".as_ref(), 4096)?;
//!     println!("Copied {} files", stats.files_copied);
//!     Ok(())
//! }
//! ```

pub mod checkpoint;
pub mod config;
pub mod digest;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod remove;
pub mod replicate;

// Re-export commonly used types and functions
pub use config::{Config, DEFAULT_BUFFER_SIZE};
pub use digest::{fingerprint, Digest};
pub use error::MirrorError;
pub use reconcile::{sync, SyncStats};
pub use replicate::{replicate, CopyOutcome};

// vim: ts=4
