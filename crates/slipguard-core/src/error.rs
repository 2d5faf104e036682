//! Error types for archive extraction operations.

use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while extracting or inspecting an archive.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation failed outside of any particular entry (opening the
    /// archive, preparing the destination).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O operation failed while materializing a specific entry.
    #[error("I/O error while extracting '{name}': {source}")]
    Entry {
        /// Raw name of the entry being written.
        name: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Archive is corrupted or cannot be decoded.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Entry would resolve outside the destination directory.
    #[error("unsafe entry path: {name}")]
    UnsafeEntryPath {
        /// Raw entry name as stored in the archive.
        name: String,
    },
}

impl ExtractionError {
    /// Returns `true` if this error represents a path traversal attempt.
    ///
    /// # Examples
    ///
    /// ```
    /// use slipguard_core::ExtractionError;
    ///
    /// let err = ExtractionError::UnsafeEntryPath {
    ///     name: "../etc/passwd".to_string(),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ExtractionError::InvalidArchive("truncated".to_string());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::UnsafeEntryPath { .. })
    }

    /// Returns `true` if this error stems from reading or writing data:
    /// filesystem failures and corrupt archive streams alike.
    #[must_use]
    pub const fn is_io_failure(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Entry { .. } | Self::InvalidArchive(_)
        )
    }

    /// Returns the raw entry name this error refers to, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use slipguard_core::ExtractionError;
    ///
    /// let err = ExtractionError::UnsafeEntryPath {
    ///     name: "../../evil.txt".to_string(),
    /// };
    /// assert_eq!(err.entry_name(), Some("../../evil.txt"));
    /// ```
    #[must_use]
    pub fn entry_name(&self) -> Option<&str> {
        match self {
            Self::Entry { name, .. } | Self::UnsafeEntryPath { name } => Some(name),
            _ => None,
        }
    }

    /// Wraps an I/O failure with the name of the entry being materialized.
    pub(crate) fn entry(name: &str, source: std::io::Error) -> Self {
        Self::Entry {
            name: name.to_string(),
            source,
        }
    }
}

impl From<zip::result::ZipError> for ExtractionError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Self::Io(e),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}
