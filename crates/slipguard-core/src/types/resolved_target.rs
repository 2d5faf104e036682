//! Resolved extraction target type.

use std::path::Path;
use std::path::PathBuf;

/// The absolute output path computed for one archive entry.
///
/// A `ResolvedTarget` is always equal to, or nested inside, the
/// [`DestDir`](super::DestDir) it was resolved against.
///
/// # Security Properties
///
/// - Can ONLY be constructed by [`resolve`](crate::security::resolve)
/// - NO `From<PathBuf>` implementation
/// - Always lexically normalized (no `.` or `..` components)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedTarget(PathBuf);

impl ResolvedTarget {
    /// Wraps a path that has already passed the containment check.
    pub(crate) fn new_unchecked(path: PathBuf) -> Self {
        Self(path)
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Converts into the inner `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ResolvedTarget {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
