//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "slipguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the zip archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: Option<PathBuf>,

    /// Directory to extract into
    #[arg(value_name = "DEST_DIR")]
    pub dest_dir: Option<PathBuf>,

    /// Entry to print as text before extracting
    #[arg(value_name = "PREVIEW_ENTRY")]
    pub preview_entry: Option<String>,

    /// List archive entries instead of extracting
    #[arg(short, long, conflicts_with = "comment")]
    pub list: bool,

    /// Print the archive comment instead of extracting
    #[arg(short = 'z', long)]
    pub comment: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress and summary output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

/// What a parsed command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Action<'a> {
    /// Not enough positional arguments; show usage.
    Usage,
    Extract {
        archive: &'a std::path::Path,
        dest_dir: &'a std::path::Path,
        preview_entry: Option<&'a str>,
    },
    List {
        archive: &'a std::path::Path,
    },
    Comment {
        archive: &'a std::path::Path,
    },
}

impl Cli {
    /// Maps the positional arguments and mode flags to an action.
    ///
    /// Extraction needs both ARCHIVE and DEST_DIR; listing and printing the
    /// comment only need ARCHIVE. An empty preview entry counts as absent.
    pub fn action(&self) -> Action<'_> {
        let Some(archive) = self.archive.as_deref() else {
            return Action::Usage;
        };

        if self.list {
            return Action::List { archive };
        }
        if self.comment {
            return Action::Comment { archive };
        }

        match self.dest_dir.as_deref() {
            Some(dest_dir) => Action::Extract {
                archive,
                dest_dir,
                preview_entry: self.preview_entry.as_deref().filter(|e| !e.is_empty()),
            },
            None => Action::Usage,
        }
    }
}

impl Action<'_> {
    /// Operation name used in JSON output.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Extract { .. } => "extract",
            Self::List { .. } => "list",
            Self::Comment { .. } => "comment",
        }
    }
}
