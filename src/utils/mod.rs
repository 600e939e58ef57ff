//! Utility functions
//!
//! Timestamp handling, display formatting, file kind lookup and input
//! validation.

pub mod file_kind;
pub mod format;
pub mod timestamp;
pub mod validation;

pub use file_kind::{FileKind, file_kind};
pub use format::{format_date, format_file_size};
pub use validation::{is_valid_display_name, is_valid_email};
