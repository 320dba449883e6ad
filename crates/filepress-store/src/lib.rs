//! Flat artifact storage for filepress.
//!
//! One root directory holds every produced archive and every extraction
//! scratch tree. The store owns name generation and is the only way to map a
//! caller-supplied artifact name back to bytes.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   report.pdf.zip                         packed artifacts
//!   decompressed_bundle.zip_<stamp>.zip    re-bundled unpack results
//!   extracted_<stamp>/                     scratch trees (kept until cleaned)
//!   .tmp.<uuid>.filepress                  in-flight writes
//! ```
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use filepress_store::OutputStore;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = OutputStore::new(dir.path()).unwrap();
//!
//! let mut artifact = store.create_artifact("hello.zip").unwrap();
//! artifact.writer().write_all(b"not really a zip").unwrap();
//! artifact.commit().unwrap();
//!
//! assert_eq!(store.read("../hello.zip").unwrap(), b"not really a zip");
//! ```

pub use artifact::PendingArtifact;
pub use error::{Error, Result};
pub use naming::{SCRATCH_PREFIX, final_segment, stamp};
pub use store::OutputStore;

mod artifact;
mod error;
mod naming;
mod store;
