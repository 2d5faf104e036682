//! Zip extraction hardened against path traversal ("zip slip").
//!
//! `slipguard-core` streams the entries of a zip archive onto disk in the
//! order they appear, refusing any entry whose name would resolve outside
//! the destination directory. It also offers read-only helpers to preview a
//! single entry as text, list entries, and read the archive comment.
//!
//! # Examples
//!
//! ```no_run
//! use slipguard_core::ExtractConfig;
//! use slipguard_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::default();
//! let report = extract_archive("archive.zip", "/output/dir", &config)?;
//! println!("Extracted {} entries", report.total_items());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod inspection;
pub mod io;
pub mod report;
pub mod security;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

pub use api::extract_archive;
pub use api::extract_archive_with_observer;
pub use api::extract_from_reader;
pub use config::ExtractConfig;
pub use error::ExtractionError;
pub use error::Result;
pub use inspection::ArchiveListing;
pub use inspection::archive_comment;
pub use inspection::list_entries;
pub use inspection::read_entry_as_text;
pub use report::ExtractObserver;
pub use report::ExtractionReport;
pub use report::NoopObserver;

pub use types::DestDir;
pub use types::EntryInfo;
pub use types::EntryKind;
pub use types::ResolvedTarget;
