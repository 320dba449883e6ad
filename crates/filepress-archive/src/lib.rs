//! Zip packing and zip-slip safe unpacking with size statistics.
//!
//! # Architecture
//!
//! - `pack.rs` - Single-entry archives and directory re-bundling
//! - `unpack.rs` - Validate, extract to scratch, re-bundle
//! - `extract.rs` - Streaming, bounded entry extraction
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `stats.rs` - Outcome records, ratio and size formatting
//! - `options.rs` - Extraction limits
//!
//! Both [`Packer::pack`] and [`Unpacker::unpack`] always return a
//! [`CompressionStats`]; failures are carried in the record. Produced
//! archives are fetched back through the shared [`OutputStore`].
//!
//! # Example
//!
//! ```
//! use filepress_archive::{OutputStore, Packer, Unpacker};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = OutputStore::new(dir.path()).unwrap();
//!
//! let packed = Packer::new(store.clone()).pack("notes.txt", b"hello hello hello");
//! assert!(packed.succeeded());
//!
//! let archive = store.read(packed.output_name().unwrap()).unwrap();
//! let unpacked = Unpacker::new(store).unpack("notes.txt.zip", &archive);
//! assert_eq!(unpacked.produced_size(), 17);
//! ```

pub use entry::{Entry, EntryKind, UnpackReport};
pub use error::{Error, ErrorKind, Result};
pub use filepress_store::OutputStore;
pub use options::UnpackOptions;
pub use pack::{Packer, sanitize_name};
pub use stats::{CompressionStats, Stopwatch, format_size};
pub use unpack::{ARCHIVE_SUFFIX, EMPTY_ARCHIVE_MESSAGE, Unpacker, is_archive_name};

pub mod entry;
mod error;
mod extract;
pub mod options;
mod pack;
mod sanitize;
mod stats;
mod unpack;
