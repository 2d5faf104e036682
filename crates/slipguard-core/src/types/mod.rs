//! Type-safe wrappers for archive extraction operations.
//!
//! The output path of an entry is a [`ResolvedTarget`], which can only be
//! obtained by resolving an entry name against a [`DestDir`]. Code that
//! writes to the filesystem takes a `ResolvedTarget`, so an unchecked path
//! cannot reach it.

pub mod dest_dir;
pub mod entry_kind;
pub mod resolved_target;

pub use dest_dir::DestDir;
pub use entry_kind::EntryInfo;
pub use entry_kind::EntryKind;
pub use resolved_target::ResolvedTarget;
