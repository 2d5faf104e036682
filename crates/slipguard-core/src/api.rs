//! High-level public API for archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use crate::ExtractConfig;
use crate::ExtractObserver;
use crate::ExtractionReport;
use crate::NoopObserver;
use crate::Result;
use crate::extraction::ExtractionEngine;
use crate::types::DestDir;

/// Extracts a zip archive into the specified output directory.
///
/// Entries are written in the order they appear in the archive, including
/// entries whose sizes are stored in a trailing data descriptor. The first
/// entry whose name would land outside `output_dir` aborts the extraction
/// with [`ExtractionError::UnsafeEntryPath`](crate::ExtractionError).
///
/// # Arguments
///
/// * `archive_path` - Path to the zip file
/// * `output_dir` - Directory where entries will be extracted
/// * `config` - Extraction configuration
///
/// # Errors
///
/// Returns an error if:
/// - Archive file cannot be opened
/// - Archive structure is corrupt
/// - An entry name escapes the output directory
/// - I/O operations fail
///
/// # Examples
///
/// ```no_run
/// use slipguard_core::ExtractConfig;
/// use slipguard_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractConfig::default();
/// let report = extract_archive("archive.zip", "/tmp/output", &config)?;
/// for path in report.paths() {
///     println!("{}", path.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    extract_archive_with_observer(archive_path, output_dir, config, &mut NoopObserver)
}

/// Extracts a zip archive, notifying `observer` after each entry is written.
///
/// # Errors
///
/// Same as [`extract_archive`].
///
/// # Examples
///
/// ```no_run
/// use slipguard_core::ExtractConfig;
/// use slipguard_core::extract_archive_with_observer;
/// use slipguard_core::types::EntryInfo;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractConfig::default();
/// let mut progress = |entry: &EntryInfo, target: &Path| {
///     println!("{} -> {}", entry.name, target.display());
/// };
/// extract_archive_with_observer("archive.zip", "/tmp/output", &config, &mut progress)?;
/// # Ok(())
/// # }
/// ```
pub fn extract_archive_with_observer<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
    observer: &mut dyn ExtractObserver,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let dest = DestDir::new(output_dir.as_ref())?;

    tracing::info!(
        archive = %archive_path.display(),
        dest = %dest.as_path().display(),
        "extracting archive"
    );

    let file = File::open(archive_path)?;
    ExtractionEngine::new(dest, config).run_seekable(BufReader::new(file), observer)
}

/// Extracts zip data from any reader positioned at the start of an archive.
///
/// The reader is consumed forward only; it does not need to implement
/// `Seek`. Without a central directory to consult, entries written with a
/// trailing data descriptor (as non-seekable writers produce them) cannot be
/// sized and fail with
/// [`ExtractionError::InvalidArchive`](crate::ExtractionError). Prefer
/// [`extract_archive`] for archives on disk.
///
/// # Errors
///
/// Same as [`extract_archive`], minus opening the archive file.
///
/// # Examples
///
/// ```
/// use slipguard_core::ExtractConfig;
/// use slipguard_core::NoopObserver;
/// use slipguard_core::extract_from_reader;
/// use slipguard_core::test_utils::create_test_zip;
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// let data = create_test_zip(&[("a.txt", "hello")]);
/// let report = extract_from_reader(
///     Cursor::new(data),
///     temp.path(),
///     &ExtractConfig::default(),
///     &mut NoopObserver,
/// )?;
/// assert_eq!(report.paths().len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn extract_from_reader<R: Read, Q: AsRef<Path>>(
    reader: R,
    output_dir: Q,
    config: &ExtractConfig,
    observer: &mut dyn ExtractObserver,
) -> Result<ExtractionReport> {
    let dest = DestDir::new(output_dir.as_ref())?;
    tracing::info!(dest = %dest.as_path().display(), "extracting archive stream");
    ExtractionEngine::new(dest, config).run(reader, observer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ExtractionError;
    use crate::test_utils::RawZipBuilder;
    use crate::test_utils::create_streamed_test_zip;
    use crate::test_utils::create_test_zip;
    use crate::types::EntryInfo;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_archive_from_file() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("test.zip");
        fs::write(&archive, create_test_zip(&[("a.txt", "hello")])).unwrap();
        let out = temp.path().join("out");

        let report = extract_archive(&archive, &out, &ExtractConfig::default()).unwrap();

        assert_eq!(report.paths(), [out.join("a.txt")]);
        assert_eq!(fs::read_to_string(out.join("a.txt")).unwrap(), "hello");
    }

    #[test]
    fn test_extract_archive_with_data_descriptors() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("streamed.zip");
        fs::write(
            &archive,
            create_streamed_test_zip(&[("a.txt", "hello"), ("dir/b.txt", "world")]),
        )
        .unwrap();
        let out = temp.path().join("out");

        let report = extract_archive(&archive, &out, &ExtractConfig::default()).unwrap();

        assert_eq!(report.paths(), [out.join("a.txt"), out.join("dir/b.txt")]);
        assert_eq!(fs::read_to_string(out.join("a.txt")).unwrap(), "hello");
        assert_eq!(fs::read_to_string(out.join("dir/b.txt")).unwrap(), "world");
    }

    #[test]
    fn test_reader_with_data_descriptors_is_rejected() {
        let temp = TempDir::new().unwrap();
        let data = create_streamed_test_zip(&[("a.txt", "hello")]);

        let err = extract_from_reader(
            std::io::Cursor::new(data),
            temp.path(),
            &ExtractConfig::default(),
            &mut NoopObserver,
        )
        .unwrap_err();

        assert!(matches!(err, ExtractionError::InvalidArchive(_)));
    }

    #[test]
    fn test_missing_archive_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = extract_archive(
            temp.path().join("nope.zip"),
            temp.path().join("out"),
            &ExtractConfig::default(),
        );
        assert!(matches!(result, Err(ExtractionError::Io(_))));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_output_dir_is_normalized() {
        let temp = TempDir::new().unwrap();
        let data = create_test_zip(&[("a.txt", "x")]);
        let nested = temp.path().join("nested");

        let report = extract_from_reader(
            std::io::Cursor::new(data),
            nested.join("sub").join(".."),
            &ExtractConfig::default(),
            &mut NoopObserver,
        )
        .unwrap();

        assert_eq!(report.paths(), [nested.join("a.txt")]);
    }

    #[test]
    fn test_observer_receives_every_entry() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("test.zip");
        let data = RawZipBuilder::new()
            .add_directory("docs/")
            .add_file("docs/readme.txt", b"read")
            .build();
        fs::write(&archive, data).unwrap();

        let mut names = Vec::new();
        let mut observer = |entry: &EntryInfo, _target: &Path| names.push(entry.name.clone());
        let report = extract_archive_with_observer(
            &archive,
            temp.path().join("out"),
            &ExtractConfig::default(),
            &mut observer,
        )
        .unwrap();

        assert_eq!(names, ["docs/", "docs/readme.txt"]);
        assert_eq!(report.total_items(), 2);
    }
}
