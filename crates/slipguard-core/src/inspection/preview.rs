//! Reading a single entry as text.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::ExtractionError;
use crate::Result;

/// Reads one entry of a zip file and decodes it as UTF-8 text.
///
/// The entry is looked up by its exact stored name through the central
/// directory. Invalid UTF-8 sequences are replaced with U+FFFD.
///
/// Returns `Ok(None)` when no entry has that name.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or read, or if the
/// entry content cannot be decompressed.
///
/// # Examples
///
/// ```no_run
/// use slipguard_core::read_entry_as_text;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// match read_entry_as_text("archive.zip", "notes/todo.txt")? {
///     Some(text) => println!("{text}"),
///     None => println!("no such entry"),
/// }
/// # Ok(())
/// # }
/// ```
pub fn read_entry_as_text<P: AsRef<Path>>(
    archive_path: P,
    entry_name: &str,
) -> Result<Option<String>> {
    let file = File::open(archive_path.as_ref())?;
    read_entry_as_text_from(BufReader::new(file), entry_name)
}

/// Same as [`read_entry_as_text`] for an in-memory or already opened
/// archive.
///
/// # Errors
///
/// Returns an error if the archive structure is invalid or the entry
/// content cannot be read.
///
/// # Examples
///
/// ```
/// use slipguard_core::inspection::read_entry_as_text_from;
/// use slipguard_core::test_utils::create_test_zip;
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = create_test_zip(&[("a.txt", "hello")]);
/// let text = read_entry_as_text_from(Cursor::new(data), "a.txt")?;
/// assert_eq!(text.as_deref(), Some("hello"));
/// # Ok(())
/// # }
/// ```
pub fn read_entry_as_text_from<R: Read + Seek>(
    reader: R,
    entry_name: &str,
) -> Result<Option<String>> {
    let mut archive = ZipArchive::new(reader)?;

    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            tracing::debug!(entry = entry_name, "preview entry not found");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| ExtractionError::entry(entry_name, e))?;

    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
