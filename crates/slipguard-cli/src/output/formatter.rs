//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use slipguard_core::ArchiveListing;
use slipguard_core::EntryInfo;
use slipguard_core::ExtractionReport;
use std::path::Path;

/// Text of the entry requested for preview; `None` when the archive has no
/// entry of that name.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub entry: String,
    pub text: Option<String>,
}

/// Everything known once an extraction has finished.
pub struct ExtractionSummary<'a> {
    pub archive: &'a Path,
    pub dest: &'a Path,
    pub preview: Option<&'a Preview>,
    pub report: &'a ExtractionReport,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Announces an extraction before anything is read from the archive.
    fn format_extraction_start(&self, archive: &Path, dest: &Path);

    /// Shows the text of an entry requested for preview.
    fn format_preview(&self, preview: &Preview);

    /// Returns the progress line for one extracted entry, if any.
    fn format_entry(&self, entry: &EntryInfo, target: &Path) -> Option<String>;

    /// Format extraction result
    fn format_extraction_result(&self, summary: &ExtractionSummary<'_>) -> Result<()>;

    /// Format archive listing
    fn format_listing(&self, archive: &Path, listing: &ArchiveListing) -> Result<()>;

    /// Format archive comment
    fn format_comment(&self, archive: &Path, comment: &str) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
