//! Extraction configuration.

/// Default size of the buffer used to stream entry content to disk (64 KiB).
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Options controlling how an archive is materialized on disk.
///
/// Path safety is not configurable: every entry is always checked against
/// the destination root.
///
/// # Examples
///
/// ```
/// use slipguard_core::ExtractConfig;
///
/// let config = ExtractConfig {
///     create_destination: false,
///     ..Default::default()
/// };
/// assert_eq!(config.copy_buffer_size, 64 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Create the destination root before reading any entry.
    ///
    /// When `false` the root only comes into existence once an entry needs
    /// it, so an archive with no entries leaves nothing behind.
    pub create_destination: bool,

    /// Size in bytes of the buffer used when copying entry content.
    /// Zero is treated as [`DEFAULT_COPY_BUFFER_SIZE`].
    pub copy_buffer_size: usize,
}

impl Default for ExtractConfig {
    /// Default values:
    /// - `create_destination`: true
    /// - `copy_buffer_size`: 64 KiB
    fn default() -> Self {
        Self {
            create_destination: true,
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
        }
    }
}

impl ExtractConfig {
    /// Sets whether the destination root is created up front.
    #[must_use]
    pub fn with_create_destination(mut self, create: bool) -> Self {
        self.create_destination = create;
        self
    }

    /// Sets the copy buffer size in bytes.
    #[must_use]
    pub fn with_copy_buffer_size(mut self, size: usize) -> Self {
        self.copy_buffer_size = size;
        self
    }

    /// Returns the effective copy buffer size.
    #[must_use]
    pub fn effective_copy_buffer_size(&self) -> usize {
        if self.copy_buffer_size == 0 {
            DEFAULT_COPY_BUFFER_SIZE
        } else {
            self.copy_buffer_size
        }
    }
}
