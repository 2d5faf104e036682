//! Security validation modules.

pub mod path;

pub use path::normalize_lexically;
pub use path::resolve;
