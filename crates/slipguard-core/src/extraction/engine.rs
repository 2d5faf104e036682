//! Core extraction engine.

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::time::Instant;

use crate::ExtractConfig;
use crate::ExtractObserver;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::io::EntryStream;
use crate::security::resolve;
use crate::types::DestDir;
use crate::types::EntryInfo;
use crate::types::EntryKind;
use crate::types::ResolvedTarget;

/// Streams zip entries from a reader onto disk under one destination.
///
/// Entries are processed strictly in the order they appear in the stream.
/// Nothing is reordered or de-duplicated: a name that occurs twice is
/// written twice, the later content replacing the earlier.
pub struct ExtractionEngine<'a> {
    dest: DestDir,
    config: &'a ExtractConfig,
    buffer: CopyBuffer,
    report: ExtractionReport,
}

impl<'a> ExtractionEngine<'a> {
    /// Creates a new engine writing into `dest`.
    #[must_use]
    pub fn new(dest: DestDir, config: &'a ExtractConfig) -> Self {
        Self {
            buffer: CopyBuffer::with_size(config.effective_copy_buffer_size()),
            dest,
            config,
            report: ExtractionReport::new(),
        }
    }

    /// Returns the destination directory.
    #[must_use]
    pub fn dest(&self) -> &DestDir {
        &self.dest
    }

    /// Reads every entry from `reader` and materializes it.
    ///
    /// The observer is notified after each entry exists on disk, before its
    /// path is appended to the report. The reader is consumed forward only,
    /// so entries that keep their sizes in a data descriptor are rejected;
    /// use [`run_seekable`](Self::run_seekable) when the source can seek.
    ///
    /// # Errors
    ///
    /// Stops at the first failing entry. Entries written before the failure
    /// stay on disk; the partial report is discarded.
    pub fn run<R: Read>(
        self,
        reader: R,
        observer: &mut dyn ExtractObserver,
    ) -> Result<ExtractionReport> {
        self.run_stream(EntryStream::new(reader), observer)
    }

    /// Like [`run`](Self::run), for a seekable archive.
    ///
    /// The central directory is read before anything is written, which lets
    /// entries with trailing data descriptors be extracted too. Entries are
    /// still processed in stream order.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run), plus failure to read the central
    /// directory.
    pub fn run_seekable<R: Read + Seek>(
        self,
        reader: R,
        observer: &mut dyn ExtractObserver,
    ) -> Result<ExtractionReport> {
        let stream = EntryStream::with_central_directory(reader)?;
        self.run_stream(stream, observer)
    }

    fn run_stream<R: Read>(
        mut self,
        mut stream: EntryStream<R>,
        observer: &mut dyn ExtractObserver,
    ) -> Result<ExtractionReport> {
        let start = Instant::now();

        if self.config.create_destination {
            fs::create_dir_all(self.dest.as_path())?;
        }

        while let Some(mut file) = stream.next_entry()? {
            let info = EntryInfo::from_zip(&file);
            let target = resolve(&info.name, &self.dest)?;

            match info.kind {
                EntryKind::Directory => self.write_directory(&info, &target)?,
                EntryKind::File => self.write_file(&info, &target, &mut file)?,
            }

            observer.on_extracted(&info, target.as_path());
            self.report.paths.push(target.into_path_buf());
        }

        self.report.duration = start.elapsed();
        tracing::info!(
            dest = %self.dest.as_path().display(),
            files = self.report.files_extracted,
            directories = self.report.directories_created,
            bytes = self.report.bytes_written,
            "extraction complete"
        );
        Ok(self.report)
    }

    fn write_directory(&mut self, info: &EntryInfo, target: &ResolvedTarget) -> Result<()> {
        fs::create_dir_all(target.as_path()).map_err(|e| ExtractionError::entry(&info.name, e))?;
        self.report.directories_created += 1;
        tracing::debug!(entry = %info.name, target = %target.as_path().display(), "created directory");
        Ok(())
    }

    fn write_file<R: Read>(
        &mut self,
        info: &EntryInfo,
        target: &ResolvedTarget,
        content: &mut R,
    ) -> Result<()> {
        if let Some(parent) = target.as_path().parent() {
            fs::create_dir_all(parent).map_err(|e| ExtractionError::entry(&info.name, e))?;
        }

        // File::create truncates, so a repeated name replaces the old content.
        let mut output =
            File::create(target.as_path()).map_err(|e| ExtractionError::entry(&info.name, e))?;
        let written = copy_with_buffer(content, &mut output, &mut self.buffer)
            .map_err(|e| ExtractionError::entry(&info.name, e))?;

        self.report.files_extracted += 1;
        self.report.bytes_written += written;
        tracing::debug!(
            entry = %info.name,
            target = %target.as_path().display(),
            bytes = written,
            "extracted file"
        );
        Ok(())
    }
}
