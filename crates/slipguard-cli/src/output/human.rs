//! Human-readable output formatter with colors and styling.

use super::formatter::ExtractionSummary;
use super::formatter::OutputFormatter;
use super::formatter::Preview;
use anyhow::Result;
use console::Term;
use console::style;
use slipguard_core::ArchiveListing;
use slipguard_core::EntryInfo;
use slipguard_core::EntryKind;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn entry_line(entry: &EntryInfo, target: &Path) -> String {
        let verb = match entry.kind {
            EntryKind::File => "Extract",
            EntryKind::Directory => "Create",
        };
        format!("{verb} {} to {}", entry.name, target.display())
    }

    fn write_preview(&self, preview: &Preview) {
        let header = format!("* preview {}:", preview.entry);
        if self.use_colors {
            let _ = self.term.write_line(&style(header).cyan().bold().to_string());
        } else {
            let _ = self.term.write_line(&header);
        }

        match &preview.text {
            Some(text) => {
                let _ = self.term.write_line(text);
            }
            None if self.use_colors => {
                let _ = self.term.write_line(&format!(
                    "{} entry not found in archive",
                    style("⚠").yellow().bold()
                ));
            }
            None => {
                let _ = self.term.write_line("WARNING: entry not found in archive");
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_start(&self, archive: &Path, dest: &Path) {
        if !self.quiet {
            let _ = self.term.write_line(&format!(
                "Extracting {} to {} ...",
                archive.display(),
                dest.display()
            ));
        }
    }

    fn format_preview(&self, preview: &Preview) {
        // An explicitly requested preview is shown even in quiet mode.
        self.write_preview(preview);
    }

    fn format_entry(&self, entry: &EntryInfo, target: &Path) -> Option<String> {
        if self.quiet {
            return None;
        }

        let line = Self::entry_line(entry, target);
        if self.verbose && entry.kind.is_file() {
            Some(format!("{line} ({})", Self::format_size(entry.size)))
        } else {
            Some(line)
        }
    }

    fn format_extraction_result(&self, summary: &ExtractionSummary<'_>) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let report = summary.report;
        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Extraction complete");
        }

        let _ = self.term.write_line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.files_extracted)
        ));
        let _ = self.term.write_line(&format!(
            "  Directories: {}",
            Self::format_number(report.directories_created)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size: {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Destination: {}", summary.dest.display()));
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        Ok(())
    }

    fn format_listing(&self, _archive: &Path, listing: &ArchiveListing) -> Result<()> {
        if self.quiet {
            for entry in &listing.entries {
                let _ = self.term.write_line(&entry.name);
            }
            return Ok(());
        }

        for entry in &listing.entries {
            let type_char = match entry.kind {
                EntryKind::File => "-",
                EntryKind::Directory => "d",
            };

            if self.verbose {
                let _ = self.term.write_line(&format!(
                    "{type_char} {:>10} {:>10}  {}",
                    entry.size, entry.compressed_size, entry.name
                ));
            } else {
                let _ = self.term.write_line(&format!(
                    "{type_char} {:>10}  {}",
                    entry.size, entry.name
                ));
            }
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} files, {} directories, {}",
            Self::format_number(listing.file_count()),
            Self::format_number(listing.directory_count()),
            Self::format_size(listing.total_size())
        ));

        Ok(())
    }

    fn format_comment(&self, _archive: &Path, comment: &str) -> Result<()> {
        if !comment.is_empty() {
            let _ = self.term.write_line(comment);
        } else if !self.quiet {
            let _ = self.term.write_line("(no comment)");
        }
        Ok(())
    }
}
