//! LiquidDoc console
//!
//! A line-based command surface over the catalog, the session and the
//! preferences, with numbered replies.

pub mod commands;
pub mod handlers;
pub mod responses;
pub mod runner;
pub mod state;

pub use commands::{Command, CommandResult, CommandStatus, ThemeAction, parse_command};
pub use handlers::handle_command;
pub use runner::run_console;
pub use state::Console;
