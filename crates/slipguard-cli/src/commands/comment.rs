//! Comment command implementation

use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use slipguard_core::archive_comment;
use std::path::Path;

pub fn execute(archive: &Path, formatter: &dyn OutputFormatter) -> Result<()> {
    let comment = add_archive_context(archive_comment(archive), archive)?;
    formatter.format_comment(archive, &comment)
}
