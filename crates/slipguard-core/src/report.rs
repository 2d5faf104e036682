//! Extraction reporting and observer callbacks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::EntryInfo;

/// Result of an archive extraction.
///
/// `paths` holds the resolved output path of every processed entry, in the
/// order the entries were read from the archive. Files and directories are
/// both included.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Resolved output paths in archive order.
    pub paths: Vec<PathBuf>,

    /// Number of file entries written.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.paths.len()
    }

    /// Returns the resolved paths as a slice.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Consumes the report, returning the ordered resolved paths.
    #[must_use]
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

/// Receives a notification after each entry has been written to disk.
///
/// Any `FnMut(&EntryInfo, &Path)` closure is an observer. A panic raised by
/// an observer is not caught and aborts the extraction.
///
/// # Examples
///
/// ```
/// use slipguard_core::ExtractObserver;
/// use slipguard_core::types::EntryInfo;
/// use std::path::Path;
///
/// struct Printer;
///
/// impl ExtractObserver for Printer {
///     fn on_extracted(&mut self, entry: &EntryInfo, target: &Path) {
///         println!("{} -> {}", entry.name, target.display());
///     }
/// }
///
/// let mut seen = Vec::new();
/// let mut collect = |entry: &EntryInfo, _target: &Path| seen.push(entry.name.clone());
/// collect.on_extracted(&EntryInfo::new("a.txt", 5, 5), Path::new("/out/a.txt"));
/// assert_eq!(seen, ["a.txt"]);
/// ```
pub trait ExtractObserver {
    /// Called once per entry, after its directory or file exists on disk.
    fn on_extracted(&mut self, entry: &EntryInfo, target: &Path);
}

impl<F> ExtractObserver for F
where
    F: FnMut(&EntryInfo, &Path),
{
    fn on_extracted(&mut self, entry: &EntryInfo, target: &Path) {
        self(entry, target);
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ExtractObserver for NoopObserver {
    fn on_extracted(&mut self, _entry: &EntryInfo, _target: &Path) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report() {
        let report = ExtractionReport::new();
        assert_eq!(report.files_extracted, 0);
        assert_eq!(report.directories_created, 0);
        assert_eq!(report.bytes_written, 0);
        assert!(report.paths().is_empty());
    }

    #[test]
    fn test_total_items_counts_paths() {
        let mut report = ExtractionReport::new();
        report.paths.push(PathBuf::from("/out/a"));
        report.paths.push(PathBuf::from("/out/b"));
        assert_eq!(report.total_items(), 2);
        assert_eq!(report.into_paths().len(), 2);
    }

    #[test]
    fn test_closure_observer() {
        let mut calls = Vec::new();
        {
            let mut observer = |entry: &EntryInfo, target: &Path| {
                calls.push((entry.name.clone(), target.to_path_buf()));
            };
            let observer: &mut dyn ExtractObserver = &mut observer;
            observer.on_extracted(&EntryInfo::new("dir/", 0, 0), Path::new("/out/dir"));
        }
        assert_eq!(calls, [("dir/".to_string(), PathBuf::from("/out/dir"))]);
    }

    #[test]
    fn test_noop_observer() {
        let mut observer = NoopObserver;
        observer.on_extracted(&EntryInfo::new("a.txt", 1, 1), Path::new("/out/a.txt"));
    }
}
