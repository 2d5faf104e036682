//! Error conversion utilities for CLI.
//!
//! Converts slipguard-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use slipguard_core::ExtractionError;
use std::path::Path;

/// Converts `ExtractionError` to user-friendly anyhow error with context
pub fn convert_extraction_error(err: ExtractionError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractionError::UnsafeEntryPath { name } => {
            anyhow!(
                "Security violation: Archive '{}' contains entry '{}' that resolves outside the destination directory\n\
                 HINT: This archive may be malicious. Do not extract from untrusted sources. \
                 Entries preceding it may already have been written.",
                archive.display(),
                name
            )
        }
        ExtractionError::Entry { name, source } => {
            anyhow!(
                "Failed to extract '{}' from '{}': {}\n\
                 HINT: Check that the destination is writable and that no existing file blocks the entry's path.",
                name,
                archive.display(),
                source
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or may not be a zip file.",
                archive.display(),
                reason
            )
        }
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, archive))
}
