//! Error handlers
//!
//! Logging and reply formatting for errors that reach the console.

use crate::console::responses::format_response;
use crate::error::types::AppError;
use log::{error, warn};

/// Log an application error at a level matching its kind
pub fn handle_error(err: &AppError) {
    match err {
        AppError::Console(_) => warn!("Console error: {}", err),
        _ => error!("LiquidDoc error: {}", err),
    }
}

/// Convert an error to a console reply line
pub fn error_to_reply(err: &AppError) -> String {
    format_response(err.reply_code(), &err.to_string())
}
