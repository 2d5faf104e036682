//! Archive entry classification.

use std::fmt;

/// Kind of entry in an archive.
///
/// Classification relies only on the naming convention used by virtually all
/// zip producers: a name ending in `/` is a directory marker. The explicit
/// directory attribute some producers set is ignored.
///
/// # Examples
///
/// ```
/// use slipguard_core::types::EntryKind;
///
/// assert_eq!(EntryKind::from_name("docs/"), EntryKind::Directory);
/// assert_eq!(EntryKind::from_name("docs/readme.md"), EntryKind::File);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,
}

impl EntryKind {
    /// Classifies an entry from its raw archive name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.ends_with('/') {
            Self::Directory
        } else {
            Self::File
        }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns a lowercase label for display and serialization.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing one archive entry.
///
/// Handed to observers after the entry has been materialized and returned by
/// the listing functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Raw slash-separated name as stored in the archive.
    pub name: String,

    /// File or directory, derived from `name`.
    pub kind: EntryKind,

    /// Uncompressed size in bytes as recorded in the entry header.
    pub size: u64,

    /// Compressed size in bytes as recorded in the entry header.
    pub compressed_size: u64,
}

impl EntryInfo {
    /// Builds entry metadata, classifying the kind from the name.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64, compressed_size: u64) -> Self {
        let name = name.into();
        let kind = EntryKind::from_name(&name);
        Self {
            name,
            kind,
            size,
            compressed_size,
        }
    }

    /// Reads the metadata of a zip entry.
    pub(crate) fn from_zip<R: std::io::Read>(file: &zip::read::ZipFile<'_, R>) -> Self {
        Self::new(file.name(), file.size(), file.compressed_size())
    }
}
