//! Archive inspection without extraction.
//!
//! Nothing in this module writes to disk or checks entry names against a
//! destination.
//!
//! # Examples
//!
//! ```no_run
//! use slipguard_core::archive_comment;
//! use slipguard_core::list_entries;
//! use slipguard_core::read_entry_as_text;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! for entry in list_entries("archive.zip")? {
//!     println!("{} ({} bytes)", entry.name, entry.size);
//! }
//!
//! if let Some(text) = read_entry_as_text("archive.zip", "README.txt")? {
//!     println!("{text}");
//! }
//!
//! println!("comment: {}", archive_comment("archive.zip")?);
//! # Ok(())
//! # }
//! ```

pub mod list;
pub mod preview;

pub use list::ArchiveListing;
pub use list::archive_comment;
pub use list::list_entries;
pub use preview::read_entry_as_text;
pub use preview::read_entry_as_text_from;
