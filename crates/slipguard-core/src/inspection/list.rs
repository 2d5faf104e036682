//! Archive listing implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use zip::ZipArchive;

use crate::Result;
use crate::io::EntryStream;
use crate::types::EntryInfo;

/// Lists archive entries in stream order without extracting.
///
/// Entry names are reported as stored, including names that would be
/// rejected by extraction. The listing follows the local headers, so it
/// matches extraction order and keeps duplicate names. Entries that store
/// their sizes in a trailing data descriptor are sized from the central
/// directory.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened, its central directory
/// cannot be read, or a local header is malformed.
///
/// # Examples
///
/// ```no_run
/// use slipguard_core::list_entries;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// for entry in list_entries("archive.zip")? {
///     println!("{:>10} {}", entry.size, entry.name);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_entries<P: AsRef<Path>>(archive_path: P) -> Result<Vec<EntryInfo>> {
    let file = File::open(archive_path.as_ref())?;
    let mut stream = EntryStream::with_central_directory(BufReader::new(file))?;

    let mut entries = Vec::new();
    while let Some(file) = stream.next_entry()? {
        entries.push(EntryInfo::from_zip(&file));
    }

    tracing::debug!(
        archive = %archive_path.as_ref().display(),
        entries = entries.len(),
        "listed archive"
    );
    Ok(entries)
}

/// Returns the archive comment, decoded as UTF-8 with replacement.
///
/// An archive without a comment yields an empty string.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or its end of central
/// directory record cannot be found.
pub fn archive_comment<P: AsRef<Path>>(archive_path: P) -> Result<String> {
    let file = File::open(archive_path.as_ref())?;
    let archive = ZipArchive::new(BufReader::new(file))?;
    Ok(String::from_utf8_lossy(archive.comment()).into_owned())
}

/// Entries of an archive with summary statistics.
///
/// # Examples
///
/// ```
/// use slipguard_core::ArchiveListing;
/// use slipguard_core::EntryInfo;
///
/// let listing = ArchiveListing::new(vec![
///     EntryInfo::new("docs/", 0, 0),
///     EntryInfo::new("docs/a.txt", 100, 40),
///     EntryInfo::new("b.txt", 20, 20),
/// ]);
///
/// assert_eq!(listing.file_count(), 2);
/// assert_eq!(listing.directory_count(), 1);
/// assert_eq!(listing.total_size(), 120);
/// assert_eq!(listing.total_compressed_size(), 60);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveListing {
    /// Entries in stream order.
    pub entries: Vec<EntryInfo>,
}

impl ArchiveListing {
    /// Wraps an ordered list of entries.
    #[must_use]
    pub fn new(entries: Vec<EntryInfo>) -> Self {
        Self { entries }
    }

    /// Reads the listing of an archive file.
    ///
    /// # Errors
    ///
    /// Same as [`list_entries`].
    pub fn from_archive<P: AsRef<Path>>(archive_path: P) -> Result<Self> {
        list_entries(archive_path).map(Self::new)
    }

    /// Number of file entries.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.kind.is_file()).count()
    }

    /// Number of directory entries.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.kind.is_directory()).count()
    }

    /// Sum of uncompressed sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Sum of compressed sizes.
    #[must_use]
    pub fn total_compressed_size(&self) -> u64 {
        self.entries.iter().map(|e| e.compressed_size).sum()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::EntryKind;
    use crate::ExtractionError;
    use crate::test_utils::RawZipBuilder;
    use crate::test_utils::create_streamed_test_zip;
    use crate::test_utils::create_test_zip;
    use std::fs;
    use tempfile::TempDir;

    fn write_archive(temp: &TempDir, data: &[u8]) -> std::path::PathBuf {
        let path = temp.path().join("test.zip");
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_list_entries_in_stream_order() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            &temp,
            &RawZipBuilder::new()
                .add_file("z.txt", b"last letter")
                .add_directory("a/")
                .add_file("a/b.txt", b"hi")
                .build(),
        );

        let entries = list_entries(&archive).unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["z.txt", "a/", "a/b.txt"]);
        assert_eq!(entries[0].size, 11);
        assert_eq!(entries[1].kind, EntryKind::Directory);
    }

    #[test]
    fn test_list_data_descriptor_entries() {
        let temp = TempDir::new().unwrap();
        let body = "repeated text ".repeat(100);
        let archive = write_archive(
            &temp,
            &create_streamed_test_zip(&[("a.txt", "hello"), ("logs/b.log", body.as_str())]),
        );

        let listing = ArchiveListing::from_archive(&archive).unwrap();

        let names: Vec<_> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "logs/b.log"]);
        assert_eq!(listing.entries[0].size, 5);
        assert_eq!(listing.entries[1].size, body.len() as u64);
        assert!(listing.entries[1].compressed_size > 0);
        assert!(listing.entries[1].compressed_size < listing.entries[1].size);
        assert_eq!(listing.total_size(), 5 + body.len() as u64);
    }

    #[test]
    fn test_list_duplicate_descriptor_entries() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            &temp,
            &RawZipBuilder::new()
                .data_descriptors(true)
                .add_file("dup.txt", b"one")
                .add_file("dup.txt", b"three")
                .build(),
        );

        let entries = list_entries(&archive).unwrap();

        let sizes: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.size)).collect();
        assert_eq!(sizes, [("dup.txt", 3), ("dup.txt", 5)]);
    }

    #[test]
    fn test_list_keeps_unsafe_names_and_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            &temp,
            &RawZipBuilder::new()
                .add_file("../../evil.txt", b"payload")
                .add_file("/abs.txt", b"abs")
                .build(),
        );

        let entries = list_entries(&archive).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "../../evil.txt");
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_listing_summary() {
        let temp = TempDir::new().unwrap();
        let data = create_test_zip(&[("a.txt", "hello"), ("b.txt", "world!")]);
        let archive = write_archive(&temp, &data);

        let listing = ArchiveListing::from_archive(&archive).unwrap();

        assert_eq!(listing.file_count(), 2);
        assert_eq!(listing.directory_count(), 0);
        assert_eq!(listing.total_size(), 11);
        assert!(!listing.is_empty());
    }

    #[test]
    fn test_empty_archive_listing() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(&temp, &RawZipBuilder::new().build());

        let listing = ArchiveListing::from_archive(&archive).unwrap();

        assert!(listing.is_empty());
        assert_eq!(listing.total_size(), 0);
    }

    #[test]
    fn test_archive_comment() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(
            &temp,
            &RawZipBuilder::new()
                .add_file("a.txt", b"x")
                .comment("built for testing")
                .build(),
        );

        assert_eq!(archive_comment(&archive).unwrap(), "built for testing");
    }

    #[test]
    fn test_archive_without_comment() {
        let temp = TempDir::new().unwrap();
        let archive = write_archive(&temp, &create_test_zip(&[("a.txt", "x")]));

        assert_eq!(archive_comment(&archive).unwrap(), "");
    }

    #[test]
    fn test_list_missing_archive() {
        let temp = TempDir::new().unwrap();
        let result = list_entries(temp.path().join("nope.zip"));
        assert!(matches!(result, Err(ExtractionError::Io(_))));
    }
}
