//! Stream-order iteration over zip entries.
//!
//! `zip::read::read_zipfile_from_stream` stops cleanly at the first central
//! directory header but rejects an end-of-central-directory record appearing
//! where a local header is expected, which is exactly what an archive with no
//! entries looks like. `EntryStream` peeks at the next signature and treats
//! any trailing record, or a clean end of input, as the end of entries.
//!
//! The stream reader also refuses entries whose sizes follow the data in a
//! data descriptor (general purpose flag bit 3). When the source is seekable,
//! [`EntryStream::with_central_directory`] first collects the sizes recorded
//! in the central directory, keyed by local header offset. Such headers are
//! then completed in place before the zip reader sees them, and the trailing
//! descriptor is skipped once the entry has been consumed.

use std::collections::HashMap;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::{self};

use zip::ZipArchive;
use zip::read::ZipFile;

use crate::ExtractionError;
use crate::Result;

const LOCAL_FILE_HEADER: u32 = 0x0403_4b50;
const CENTRAL_DIRECTORY_HEADER: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY: u32 = 0x0605_4b50;
const ZIP64_END_OF_CENTRAL_DIRECTORY: u32 = 0x0606_4b50;
const ZIP64_END_OF_CENTRAL_DIRECTORY_LOCATOR: u32 = 0x0706_4b50;
const DATA_DESCRIPTOR: u32 = 0x0807_4b50;

const LOCAL_HEADER_LEN: usize = 30;
const FLAG_DATA_DESCRIPTOR: u16 = 1 << 3;
const ZIP64_EXTRA_FIELD: u16 = 0x0001;

/// Sizes and checksum of one entry as recorded in the central directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecordedSizes {
    crc32: u32,
    compressed_size: u64,
    size: u64,
}

/// Reader yielding zip entries one at a time in stream order.
///
/// Entries are read from their local headers, so duplicate names and the
/// physical order of the archive are preserved. Entry content must be
/// consumed (or the entry dropped) before asking for the next one; dropping
/// a [`ZipFile`] skips whatever content is left.
///
/// # Examples
///
/// ```
/// use slipguard_core::io::EntryStream;
/// use slipguard_core::test_utils::create_test_zip;
/// use std::io::Cursor;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = create_test_zip(&[("a.txt", "hello"), ("b.txt", "world")]);
/// let mut stream = EntryStream::new(Cursor::new(data));
///
/// let mut names = Vec::new();
/// while let Some(entry) = stream.next_entry()? {
///     names.push(entry.name().to_string());
/// }
/// assert_eq!(names, ["a.txt", "b.txt"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EntryStream<R> {
    inner: R,
    pending: Vec<u8>,
    pending_pos: usize,
    consumed: u64,
    recorded: Option<HashMap<u64, RecordedSizes>>,
    descriptor_after: Option<bool>,
}

impl<R: Read> EntryStream<R> {
    /// Wraps a reader positioned at the start of a zip archive.
    ///
    /// The reader is consumed forward only. Entries that defer their sizes
    /// to a data descriptor cannot be read this way and are reported as
    /// [`ExtractionError::InvalidArchive`].
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: Vec::with_capacity(LOCAL_HEADER_LEN),
            pending_pos: 0,
            consumed: 0,
            recorded: None,
            descriptor_after: None,
        }
    }

    /// Returns the next entry, or `None` once the entries are exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails, the next local
    /// header is malformed, or a data descriptor entry has no matching
    /// central directory record.
    pub fn next_entry(&mut self) -> Result<Option<ZipFile<'_, Self>>> {
        self.skip_data_descriptor()?;

        let offset = self.position();
        match self.peek_signature()? {
            None => return Ok(None),
            Some(signature) if is_trailing_record(signature) => return Ok(None),
            Some(LOCAL_FILE_HEADER) => self.complete_local_header(offset)?,
            Some(_) => {}
        }
        Ok(zip::read::read_zipfile_from_stream(self)?)
    }

    /// Consumes the stream, returning the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Offset of the next byte handed out by [`Read`].
    fn position(&self) -> u64 {
        self.consumed - (self.pending.len() - self.pending_pos) as u64
    }

    /// Buffers the next four bytes without consuming them.
    ///
    /// Returns `None` at a clean end of input. A truncated signature is left
    /// in the buffer for the zip reader to reject.
    fn peek_signature(&mut self) -> io::Result<Option<u32>> {
        let available = self.fill_pending(4)?;
        match available {
            0 => Ok(None),
            4 => {
                let bytes = &self.pending[self.pending_pos..self.pending_pos + 4];
                Ok(Some(u32::from_le_bytes([
                    bytes[0], bytes[1], bytes[2], bytes[3],
                ])))
            }
            _ => Ok(Some(0)),
        }
    }

    /// Ensures up to `len` unread bytes are buffered; returns how many are.
    fn fill_pending(&mut self, len: usize) -> io::Result<usize> {
        if self.pending_pos == self.pending.len() {
            self.pending.clear();
            self.pending_pos = 0;
        }

        while self.pending.len() - self.pending_pos < len {
            let start = self.pending.len();
            let missing = len - (start - self.pending_pos);
            self.pending.resize(start + missing, 0);
            match self.inner.read(&mut self.pending[start..]) {
                Ok(0) => {
                    self.pending.truncate(start);
                    break;
                }
                Ok(n) => {
                    self.pending.truncate(start + n);
                    self.consumed += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    self.pending.truncate(start);
                }
                Err(e) => {
                    self.pending.truncate(start);
                    return Err(e);
                }
            }
        }
        Ok(self.pending.len() - self.pending_pos)
    }

    /// Fills in the sizes of a local header that defers them to a data
    /// descriptor, using the central directory record at the same offset.
    fn complete_local_header(&mut self, offset: u64) -> Result<()> {
        if self.fill_pending(LOCAL_HEADER_LEN)? < LOCAL_HEADER_LEN {
            return Ok(());
        }

        let flags = self.header_u16(6);
        if flags & FLAG_DATA_DESCRIPTOR == 0 {
            return Ok(());
        }

        let name_len = usize::from(self.header_u16(26));
        let extra_len = usize::from(self.header_u16(28));
        let header_len = LOCAL_HEADER_LEN + name_len + extra_len;
        if self.fill_pending(header_len)? < header_len {
            return Ok(());
        }

        let Some(sizes) = self
            .recorded
            .as_ref()
            .and_then(|recorded| recorded.get(&offset).copied())
        else {
            return Err(ExtractionError::InvalidArchive(format!(
                "entry at offset {offset} stores its sizes in a data descriptor \
                 and no central directory record describes it"
            )));
        };

        let (Ok(compressed_size), Ok(size)) = (
            u32::try_from(sizes.compressed_size),
            u32::try_from(sizes.size),
        ) else {
            return Err(ExtractionError::InvalidArchive(format!(
                "entry at offset {offset} is too large to be read with a data descriptor"
            )));
        };
        if compressed_size == u32::MAX || size == u32::MAX {
            return Err(ExtractionError::InvalidArchive(format!(
                "entry at offset {offset} is too large to be read with a data descriptor"
            )));
        }

        let extra_start = self.pending_pos + LOCAL_HEADER_LEN + name_len;
        let zip64 = has_zip64_field(&self.pending[extra_start..extra_start + extra_len]);

        let header = &mut self.pending[self.pending_pos..self.pending_pos + LOCAL_HEADER_LEN];
        header[6..8].copy_from_slice(&(flags & !FLAG_DATA_DESCRIPTOR).to_le_bytes());
        header[14..18].copy_from_slice(&sizes.crc32.to_le_bytes());
        header[18..22].copy_from_slice(&compressed_size.to_le_bytes());
        header[22..26].copy_from_slice(&size.to_le_bytes());

        self.descriptor_after = Some(zip64);
        Ok(())
    }

    fn header_u16(&self, at: usize) -> u16 {
        let start = self.pending_pos + at;
        u16::from_le_bytes([self.pending[start], self.pending[start + 1]])
    }

    /// Skips the data descriptor left behind by the previous entry.
    ///
    /// The signature is optional. Sizes are eight bytes each when the local
    /// header carried a zip64 extra field, four otherwise.
    fn skip_data_descriptor(&mut self) -> io::Result<()> {
        let Some(zip64) = self.descriptor_after.take() else {
            return Ok(());
        };

        let mut word = [0u8; 4];
        self.read_exact(&mut word)?;
        if u32::from_le_bytes(word) == DATA_DESCRIPTOR {
            // Signature present; the CRC follows.
            self.read_exact(&mut word)?;
        }

        let mut sizes = [0u8; 16];
        let sizes_len = if zip64 { 16 } else { 8 };
        self.read_exact(&mut sizes[..sizes_len])
    }
}

impl<R: Read + Seek> EntryStream<R> {
    /// Wraps a seekable archive, reading its central directory first.
    ///
    /// Entries are still yielded from their local headers in stream order.
    /// The central directory only supplies the sizes of entries written with
    /// a trailing data descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the central directory cannot be read.
    pub fn with_central_directory(mut inner: R) -> Result<Self> {
        let recorded = {
            let mut archive = ZipArchive::new(&mut inner)?;
            let mut recorded = HashMap::with_capacity(archive.len());
            for index in 0..archive.len() {
                let file = archive.by_index_raw(index)?;
                recorded.insert(
                    file.header_start(),
                    RecordedSizes {
                        crc32: file.crc32(),
                        compressed_size: file.compressed_size(),
                        size: file.size(),
                    },
                );
            }
            recorded
        };
        inner.seek(SeekFrom::Start(0))?;

        let mut stream = Self::new(inner);
        stream.recorded = Some(recorded);
        Ok(stream)
    }
}

impl<R: Read> Read for EntryStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending_pos < self.pending.len() {
            let n = (self.pending.len() - self.pending_pos).min(buf.len());
            buf[..n].copy_from_slice(&self.pending[self.pending_pos..self.pending_pos + n]);
            self.pending_pos += n;
            if self.pending_pos == self.pending.len() {
                self.pending.clear();
                self.pending_pos = 0;
            }
            return Ok(n);
        }
        let n = self.inner.read(buf)?;
        self.consumed += n as u64;
        Ok(n)
    }
}

fn is_trailing_record(signature: u32) -> bool {
    matches!(
        signature,
        CENTRAL_DIRECTORY_HEADER
            | END_OF_CENTRAL_DIRECTORY
            | ZIP64_END_OF_CENTRAL_DIRECTORY
            | ZIP64_END_OF_CENTRAL_DIRECTORY_LOCATOR
    )
}

/// Returns `true` if the extra field block contains a zip64 record.
fn has_zip64_field(mut extra: &[u8]) -> bool {
    while extra.len() >= 4 {
        let tag = u16::from_le_bytes([extra[0], extra[1]]);
        let len = usize::from(u16::from_le_bytes([extra[2], extra[3]]));
        if tag == ZIP64_EXTRA_FIELD {
            return true;
        }
        extra = extra.get(4 + len..).unwrap_or_default();
    }
    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::RawZipBuilder;
    use crate::test_utils::create_streamed_test_zip;
    use crate::test_utils::create_test_zip;
    use std::io::Cursor;

    fn collect_names(data: Vec<u8>) -> Result<Vec<String>> {
        let mut stream = EntryStream::new(Cursor::new(data));
        let mut names = Vec::new();
        while let Some(entry) = stream.next_entry()? {
            names.push(entry.name().to_string());
        }
        Ok(names)
    }

    fn collect_contents(mut stream: EntryStream<Cursor<Vec<u8>>>) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        while let Some(mut entry) = stream.next_entry().unwrap() {
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            entries.push((entry.name().to_string(), content));
        }
        entries
    }

    #[test]
    fn test_empty_input_has_no_entries() {
        assert!(collect_names(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_archive_without_entries() {
        let data = RawZipBuilder::new().build();
        assert!(collect_names(data).unwrap().is_empty());
    }

    #[test]
    fn test_entries_in_stream_order() {
        let data = create_test_zip(&[("z.txt", "1"), ("a.txt", "2"), ("m/n.txt", "3")]);
        assert_eq!(collect_names(data).unwrap(), ["z.txt", "a.txt", "m/n.txt"]);
    }

    #[test]
    fn test_unread_content_is_skipped() {
        let data = RawZipBuilder::new()
            .add_file("first.txt", b"skipped without reading")
            .add_file("second.txt", b"read me")
            .build();
        let mut stream = EntryStream::new(Cursor::new(data));

        let first = stream.next_entry().unwrap().unwrap();
        assert_eq!(first.name(), "first.txt");
        drop(first);

        let mut second = stream.next_entry().unwrap().unwrap();
        let mut content = String::new();
        second.read_to_string(&mut content).unwrap();
        assert_eq!(content, "read me");
    }

    #[test]
    fn test_garbage_is_rejected() {
        let result = collect_names(b"not a zip archive at all".to_vec());
        assert!(result.is_err());
    }

    #[test]
    fn test_truncated_signature_is_rejected() {
        let result = collect_names(vec![0x50, 0x4b]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_drains_peeked_bytes_first() {
        let mut stream = EntryStream::new(Cursor::new(b"abcdef".to_vec()));
        assert_eq!(
            stream.peek_signature().unwrap(),
            Some(u32::from_le_bytes(*b"abcd"))
        );
        assert_eq!(stream.position(), 0);

        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abcdef");
        assert_eq!(stream.position(), 6);
    }

    #[test]
    fn test_data_descriptor_entries_with_central_directory() {
        let data = create_streamed_test_zip(&[("a.txt", "hello"), ("dir/b.txt", "world")]);
        let stream = EntryStream::with_central_directory(Cursor::new(data)).unwrap();

        assert_eq!(
            collect_contents(stream),
            [
                ("a.txt".to_string(), "hello".to_string()),
                ("dir/b.txt".to_string(), "world".to_string()),
            ]
        );
    }

    #[test]
    fn test_data_descriptor_entries_skipped_unread() {
        let data = create_streamed_test_zip(&[("a.txt", "first"), ("b.txt", "second")]);
        let mut stream = EntryStream::with_central_directory(Cursor::new(data)).unwrap();

        drop(stream.next_entry().unwrap().unwrap());
        let mut second = stream.next_entry().unwrap().unwrap();
        assert_eq!(second.size(), 6);
        let mut content = String::new();
        second.read_to_string(&mut content).unwrap();
        assert_eq!(content, "second");
        drop(second);

        assert!(stream.next_entry().unwrap().is_none());
    }

    #[test]
    fn test_descriptor_without_signature() {
        let data = RawZipBuilder::new()
            .data_descriptors(true)
            .descriptor_signature(false)
            .add_file("a.txt", b"one")
            .add_file("b.txt", b"two")
            .build();
        let stream = EntryStream::with_central_directory(Cursor::new(data)).unwrap();

        assert_eq!(
            collect_contents(stream),
            [
                ("a.txt".to_string(), "one".to_string()),
                ("b.txt".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_data_descriptor_duplicates_keep_stream_order() {
        let data = RawZipBuilder::new()
            .data_descriptors(true)
            .add_file("dup.txt", b"first")
            .add_file("other.txt", b"x")
            .add_file("dup.txt", b"second")
            .build();
        let stream = EntryStream::with_central_directory(Cursor::new(data)).unwrap();

        let names: Vec<String> = collect_contents(stream).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["dup.txt", "other.txt", "dup.txt"]);
    }

    #[test]
    fn test_data_descriptor_rejected_forward_only() {
        let data = create_streamed_test_zip(&[("a.txt", "hello")]);
        let err = collect_names(data).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidArchive(_)));
    }

    #[test]
    fn test_zip64_extra_field_detection() {
        assert!(!has_zip64_field(&[]));
        assert!(has_zip64_field(&[0x01, 0x00, 0x10, 0x00]));
        assert!(has_zip64_field(&[0x55, 0x54, 0x01, 0x00, 0xff, 0x01, 0x00, 0x00, 0x00]));
        assert!(!has_zip64_field(&[0x55, 0x54, 0x05, 0x00, 0x01, 0x00]));
    }
}
