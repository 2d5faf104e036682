//! List command implementation

use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use slipguard_core::ArchiveListing;
use std::path::Path;

pub fn execute(archive: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let listing = add_archive_context(ArchiveListing::from_archive(archive), archive)?;
    formatter.format_listing(archive, &listing)
}
