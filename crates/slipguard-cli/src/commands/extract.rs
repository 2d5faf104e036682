//! Extract command implementation.

use crate::error::add_archive_context;
use crate::output::ExtractionSummary;
use crate::output::OutputFormatter;
use crate::output::Preview;
use crate::progress::CliProgress;
use anyhow::Result;
use slipguard_core::ExtractConfig;
use slipguard_core::extract_archive_with_observer;
use slipguard_core::read_entry_as_text;
use std::path::Path;

pub fn execute(
    archive: &Path,
    dest: &Path,
    preview_entry: Option<&str>,
    formatter: &dyn OutputFormatter,
    hide_progress: bool,
) -> Result<()> {
    formatter.format_extraction_start(archive, dest);

    let preview = preview_entry
        .map(|entry| -> Result<Preview> {
            let text = add_archive_context(read_entry_as_text(archive, entry), archive)?;
            Ok(Preview {
                entry: entry.to_string(),
                text,
            })
        })
        .transpose()?;
    if let Some(preview) = &preview {
        formatter.format_preview(preview);
    }

    let config = ExtractConfig::default();
    let report = {
        // Use a spinner only on a TTY and when lines are wanted.
        let spinner = !hide_progress && CliProgress::should_show();
        let mut progress = CliProgress::new(formatter, spinner);
        add_archive_context(
            extract_archive_with_observer(archive, dest, &config, &mut progress),
            archive,
        )?
    };

    formatter.format_extraction_result(&ExtractionSummary {
        archive,
        dest,
        preview: preview.as_ref(),
        report: &report,
    })
}
