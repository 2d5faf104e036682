//! I/O utilities for archive operations.

pub mod entry_stream;

pub use entry_stream::EntryStream;
