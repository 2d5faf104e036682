//! Command implementations.

pub mod comment;
pub mod extract;
pub mod list;
