//! JSON output formatter for machine-readable results.

use super::formatter::ExtractionSummary;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::Preview;
use anyhow::Result;
use serde::Serialize;
use slipguard_core::ArchiveListing;
use slipguard_core::EntryInfo;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    name: &'a str,
    kind: &'static str,
    size: u64,
    compressed_size: u64,
}

impl<'a> From<&'a EntryInfo> for EntryOutput<'a> {
    fn from(entry: &'a EntryInfo) -> Self {
        Self {
            name: &entry.name,
            kind: entry.kind.as_str(),
            size: entry.size,
            compressed_size: entry.compressed_size,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_start(&self, _archive: &Path, _dest: &Path) {
        // Everything goes into the single result document.
    }

    fn format_preview(&self, _preview: &Preview) {}

    fn format_entry(&self, _entry: &EntryInfo, _target: &Path) -> Option<String> {
        None
    }

    fn format_extraction_result(&self, summary: &ExtractionSummary<'_>) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput<'a> {
            archive: String,
            destination: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            preview: Option<&'a Preview>,
            files_extracted: usize,
            directories_created: usize,
            bytes_written: u64,
            duration_ms: u128,
            paths: Vec<String>,
        }

        let report = summary.report;
        let data = ExtractionOutput {
            archive: summary.archive.display().to_string(),
            destination: summary.dest.display().to_string(),
            preview: summary.preview,
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            paths: report.paths().iter().map(|p| p.display().to_string()).collect(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_listing(&self, archive: &Path, listing: &ArchiveListing) -> Result<()> {
        #[derive(Serialize)]
        struct ListOutput<'a> {
            archive: String,
            entries: Vec<EntryOutput<'a>>,
            file_count: usize,
            directory_count: usize,
            total_size: u64,
            total_compressed_size: u64,
        }

        let data = ListOutput {
            archive: archive.display().to_string(),
            entries: listing.entries.iter().map(EntryOutput::from).collect(),
            file_count: listing.file_count(),
            directory_count: listing.directory_count(),
            total_size: listing.total_size(),
            total_compressed_size: listing.total_compressed_size(),
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_comment(&self, archive: &Path, comment: &str) -> Result<()> {
        #[derive(Serialize)]
        struct CommentOutput<'a> {
            archive: String,
            comment: &'a str,
        }

        let data = CommentOutput {
            archive: archive.display().to_string(),
            comment,
        };

        Self::output(&JsonOutput::success("comment", data))
    }
}

pub fn print_error(operation: &str, error: &anyhow::Error) {
    let output = JsonOutput::error(operation, format!("{error:#}"));
    let _ = JsonFormatter::output(&output);
}
