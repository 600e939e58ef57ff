//! Console response handling
//!
//! Reply codes and line formatting.

use chrono::{DateTime, Utc};

use crate::catalog::FileRecord;
use crate::utils::{file_kind, format_date, format_file_size};

/// Console reply codes
pub const OK: u16 = 200;
pub const STATUS: u16 = 211;
pub const HELP: u16 = 214;
pub const READY: u16 = 220;
pub const BYE: u16 = 221;
pub const LOGGED_IN: u16 = 230;
pub const ACTION_DONE: u16 = 250;
pub const NOT_FOUND: u16 = 404;
pub const UNKNOWN_COMMAND: u16 = 500;
pub const BAD_ARGUMENTS: u16 = 501;
pub const NOT_LOGGED_IN: u16 = 530;
pub const STORE_FAILED: u16 = 552;

/// Format a single-line reply
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\n", code, message)
}

/// Format a multi-line reply: `code-header`, indented lines, `code End`.
pub fn format_listing(code: u16, header: &str, lines: &[String]) -> String {
    let mut out = format!("{}-{}\n", code, header);
    for line in lines {
        out.push(' ');
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("{} End\n", code));
    out
}

/// One record as a listing line
pub fn format_record(record: &FileRecord, now: &DateTime<Utc>) -> String {
    format!(
        "{} {}  {}  {}  {}  {}",
        file_kind(record.file_type.as_deref()).icon(),
        record.id,
        record.name,
        format_file_size(record.size),
        format_date(&record.upload_date, now),
        record.privacy
    )
}
