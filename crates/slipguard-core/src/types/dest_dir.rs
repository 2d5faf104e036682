//! Destination directory type.

use crate::ExtractionError;
use crate::Result;
use crate::security::path::normalize_lexically;
use std::path::Path;
use std::path::PathBuf;

/// The root directory an archive is extracted into.
///
/// A `DestDir` always holds an absolute, lexically normalized path. Relative
/// inputs are anchored at the current working directory. The directory does
/// not have to exist yet; it is created on demand during extraction.
///
/// Symlinks are not resolved: the containment check performed for every
/// entry is purely lexical, so the root is compared in the same form the
/// caller supplied it.
///
/// # Examples
///
/// ```
/// use slipguard_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/tmp/out/./nested/..")?;
/// assert!(dest.as_path().is_absolute());
/// assert!(dest.as_path().ends_with("tmp/out"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a new `DestDir`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path is empty
    /// - The current directory cannot be determined for a relative path
    /// - The path exists but is not a directory
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ExtractionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "destination directory path is empty",
            )));
        }

        let absolute = std::path::absolute(&path).map_err(|e| {
            ExtractionError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to make path absolute {}: {}", path.display(), e),
            ))
        })?;
        let normalized = normalize_lexically(&absolute);

        if normalized.exists() && !normalized.is_dir() {
            return Err(ExtractionError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", normalized.display()),
            )));
        }

        Ok(Self(normalized))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if `path` is this directory or lies beneath it.
    ///
    /// The comparison is component-wise, so `/dest-evil` is not inside
    /// `/dest`.
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for DestDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
