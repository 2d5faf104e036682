//! Buffered copy of entry content to disk.
//!
//! One [`CopyBuffer`] is allocated per extraction and reused for every file
//! entry, instead of letting `std::io::copy` allocate on each call.

use std::io::Read;
use std::io::Write;
use std::io::{self};

/// Reusable heap buffer for streaming entry content.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Vec<u8>,
}

impl CopyBuffer {
    /// Creates a zero-initialized buffer of `size` bytes (at least one).
    #[must_use]
    pub fn with_size(size: usize) -> Self {
        Self {
            buf: vec![0u8; size.max(1)],
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::with_size(crate::config::DEFAULT_COPY_BUFFER_SIZE)
    }
}

/// Copies everything from `reader` into `writer` through `buffer`.
///
/// Returns the number of bytes copied. Interrupted reads are retried.
///
/// # Errors
///
/// Returns the first read or write error encountered.
///
/// # Examples
///
/// ```
/// use slipguard_core::copy::CopyBuffer;
/// use slipguard_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::with_size(4);
/// let mut input: &[u8] = b"hello world";
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// assert_eq!(copied, 11);
/// assert_eq!(output, b"hello world");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn copy_with_buffer<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> io::Result<u64> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total += bytes_read as u64;
    }

    writer.flush()?;
    Ok(total)
}
