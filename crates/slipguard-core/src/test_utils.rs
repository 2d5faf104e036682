//! Test utilities for building in-memory zip archives.
//!
//! # Panics
//!
//! Functions in this module may panic on I/O errors since they are designed
//! for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

/// Creates an in-memory ZIP archive of deflated text files.
///
/// Each entry is a tuple of (name, content). Names are written as given.
///
/// # Examples
///
/// ```
/// use slipguard_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("file.txt", "hello"), ("dir/nested.txt", "world")]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Creates an in-memory ZIP archive the way a non-seekable writer does.
///
/// Every entry is deflated and flagged as using a data descriptor: its local
/// header carries no CRC or sizes, which follow the compressed data instead.
/// This is the layout produced by Java's `ZipOutputStream` and most other
/// streaming writers.
///
/// # Examples
///
/// ```
/// use slipguard_core::test_utils::create_streamed_test_zip;
///
/// let zip_data = create_streamed_test_zip(&[("file.txt", "hello")]);
/// assert_eq!(zip_data[6] & 0x08, 0x08);
/// ```
#[must_use]
pub fn create_streamed_test_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new_stream(Vec::new());
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Builder writing stored ZIP records byte by byte.
///
/// Unlike `zip::ZipWriter` it accepts any entry name, including duplicates,
/// absolute names and names containing `..`, which makes it suitable for
/// crafting hostile archives. Entries are stored uncompressed with sizes and
/// CRC in the local header, followed by a matching central directory. With
/// [`data_descriptors`](Self::data_descriptors) the local headers leave those
/// fields zero and a descriptor follows each entry's data instead.
///
/// # Examples
///
/// ```
/// use slipguard_core::test_utils::RawZipBuilder;
///
/// let zip_data = RawZipBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .add_file("../../evil.txt", b"payload")
///     .comment("crafted")
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
#[derive(Debug)]
pub struct RawZipBuilder {
    entries: Vec<(String, Vec<u8>)>,
    comment: String,
    data_descriptors: bool,
    descriptor_signature: bool,
}

impl Default for RawZipBuilder {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            comment: String::new(),
            data_descriptors: false,
            descriptor_signature: true,
        }
    }
}

impl RawZipBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes CRC and sizes in a data descriptor after each entry.
    #[must_use]
    pub fn data_descriptors(mut self, enabled: bool) -> Self {
        self.data_descriptors = enabled;
        self
    }

    /// Whether data descriptors start with their optional signature.
    #[must_use]
    pub fn descriptor_signature(mut self, enabled: bool) -> Self {
        self.descriptor_signature = enabled;
        self
    }

    /// Adds a stored file entry.
    #[must_use]
    pub fn add_file(mut self, name: &str, data: &[u8]) -> Self {
        self.entries.push((name.to_string(), data.to_vec()));
        self
    }

    /// Adds a directory marker; `name` should end with `/`.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        self.entries.push((name.to_string(), Vec::new()));
        self
    }

    /// Sets the archive comment.
    #[must_use]
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    /// Serializes the archive.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn build(self) -> Vec<u8> {
        // 1980-01-01 00:00 in MS-DOS format.
        const DOS_TIME: u16 = 0;
        const DOS_DATE: u16 = (1 << 5) | 1;

        let mut out = Vec::new();
        let mut central = Vec::new();

        for (name, data) in &self.entries {
            let offset = out.len() as u32;
            let crc = crc32(data);
            let size = data.len() as u32;
            let flags: u16 = if self.data_descriptors { 1 << 3 } else { 0 };
            let (local_crc, local_size) = if self.data_descriptors {
                (0, 0)
            } else {
                (crc, size)
            };

            put_u32(&mut out, 0x0403_4b50);
            put_u16(&mut out, 20);
            put_u16(&mut out, flags);
            put_u16(&mut out, 0);
            put_u16(&mut out, DOS_TIME);
            put_u16(&mut out, DOS_DATE);
            put_u32(&mut out, local_crc);
            put_u32(&mut out, local_size);
            put_u32(&mut out, local_size);
            put_u16(&mut out, name.len() as u16);
            put_u16(&mut out, 0);
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(data);

            if self.data_descriptors {
                if self.descriptor_signature {
                    put_u32(&mut out, 0x0807_4b50);
                }
                put_u32(&mut out, crc);
                put_u32(&mut out, size);
                put_u32(&mut out, size);
            }

            put_u32(&mut central, 0x0201_4b50);
            put_u16(&mut central, 20);
            put_u16(&mut central, 20);
            put_u16(&mut central, flags);
            put_u16(&mut central, 0);
            put_u16(&mut central, DOS_TIME);
            put_u16(&mut central, DOS_DATE);
            put_u32(&mut central, crc);
            put_u32(&mut central, size);
            put_u32(&mut central, size);
            put_u16(&mut central, name.len() as u16);
            put_u16(&mut central, 0);
            put_u16(&mut central, 0);
            put_u16(&mut central, 0);
            put_u16(&mut central, 0);
            put_u32(&mut central, 0);
            put_u32(&mut central, offset);
            central.extend_from_slice(name.as_bytes());
        }

        let central_offset = out.len() as u32;
        let central_size = central.len() as u32;
        out.extend_from_slice(&central);

        put_u32(&mut out, 0x0605_4b50);
        put_u16(&mut out, 0);
        put_u16(&mut out, 0);
        put_u16(&mut out, self.entries.len() as u16);
        put_u16(&mut out, self.entries.len() as u16);
        put_u32(&mut out, central_size);
        put_u32(&mut out, central_offset);
        put_u16(&mut out, self.comment.len() as u16);
        out.extend_from_slice(self.comment.as_bytes());

        out
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// CRC-32 (IEEE) as required by the ZIP format.
fn crc32(data: &[u8]) -> u32 {
    let mut crc = !0u32;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}
