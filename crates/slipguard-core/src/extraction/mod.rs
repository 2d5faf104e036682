//! Streaming extraction of zip entries onto disk.

pub mod engine;

pub use engine::ExtractionEngine;
