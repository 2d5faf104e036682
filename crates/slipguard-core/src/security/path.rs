//! Path traversal validation.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;
use crate::types::DestDir;
use crate::types::ResolvedTarget;

/// Resolves an archive entry name to its output path under `dest`.
///
/// The raw name is joined onto the destination without any prior filtering,
/// so names containing `..` and absolute names are accepted as input. The
/// joined path is normalized lexically and must then be the destination
/// itself or lie beneath it, compared component by component.
///
/// No filesystem access is performed.
///
/// # Errors
///
/// Returns `ExtractionError::UnsafeEntryPath` carrying the raw name if the
/// normalized path escapes `dest`.
///
/// # Examples
///
/// ```
/// use slipguard_core::security::resolve;
/// use slipguard_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::new("/srv/out")?;
///
/// let target = resolve("docs/./guide/../readme.md", &dest)?;
/// assert!(target.as_path().ends_with("docs/readme.md"));
///
/// assert!(resolve("../../etc/passwd", &dest).is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve(entry_name: &str, dest: &DestDir) -> Result<ResolvedTarget> {
    let joined = dest.as_path().join(entry_name);
    let normalized = normalize_lexically(&joined);

    if !dest.contains(&normalized) {
        tracing::warn!(
            entry = entry_name,
            dest = %dest.as_path().display(),
            "rejected entry resolving outside destination"
        );
        return Err(ExtractionError::UnsafeEntryPath {
            name: entry_name.to_string(),
        });
    }

    Ok(ResolvedTarget::new_unchecked(normalized))
}

/// Collapses `.` and `..` components without touching the filesystem.
///
/// A `..` removes the preceding normal component. At the root of an
/// absolute path it is dropped, matching how the OS treats `/..`. For a
/// relative path with nothing left to remove it is kept, so the result
/// still shows that it climbs upward.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    // Normal components pushed so far; `..` may only pop these.
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                normalized.push(component);
                depth = 0;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    normalized.pop();
                    depth -= 1;
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            Component::Normal(name) => {
                normalized.push(name);
                depth += 1;
            }
        }
    }

    normalized
}
