//! Error types
//!
//! Defines domain-specific error types for the store and the console.

use std::fmt;
use std::io;

/// Store module errors
#[derive(Debug)]
pub enum StoreError {
    Serialize(serde_json::Error),
    Deserialize { key: String, source: serde_json::Error },
    Io(io::Error),
    QuotaExceeded { key: String, needed: u64, quota: u64 },
    InvalidKey(String),
    Poisoned,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Serialize(e) => write!(f, "Failed to serialize value: {}", e),
            StoreError::Deserialize { key, source } => {
                write!(f, "Stored value for '{}' is not valid: {}", key, source)
            }
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::QuotaExceeded { key, needed, quota } => write!(
                f,
                "Quota exceeded writing '{}': {} bytes needed, quota is {}",
                key, needed, quota
            ),
            StoreError::InvalidKey(k) => write!(f, "Invalid store key: {:?}", k),
            StoreError::Poisoned => write!(f, "Store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Serialize(e) => Some(e),
            StoreError::Deserialize { source, .. } => Some(source),
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(error: io::Error) -> Self {
        StoreError::Io(error)
    }
}

/// Console module errors
#[derive(Debug, PartialEq)]
pub enum ConsoleError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidArgument { name: &'static str, value: String },
    CommandTooLong(usize),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::UnknownCommand(c) => write!(f, "Unknown command: {}", c),
            ConsoleError::MissingArgument(name) => write!(f, "Missing argument: {}", name),
            ConsoleError::InvalidArgument { name, value } => {
                write!(f, "Invalid {}: {}", name, value)
            }
            ConsoleError::CommandTooLong(len) => write!(f, "Command too long ({} bytes)", len),
        }
    }
}

impl std::error::Error for ConsoleError {}

/// General application error that encompasses all error types
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Console(ConsoleError),
    IoError(io::Error),
    Config(config::ConfigError),
}

impl AppError {
    /// Console status code used when this error is reported to the user
    pub fn reply_code(&self) -> u16 {
        match self {
            AppError::Store(_) => 552,
            AppError::Console(ConsoleError::UnknownCommand(_)) => 500,
            AppError::Console(ConsoleError::CommandTooLong(_)) => 500,
            AppError::Console(_) => 501,
            AppError::IoError(_) => 451,
            AppError::Config(_) => 451,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store(e) => write!(f, "Storage error: {}", e),
            AppError::Console(e) => write!(f, "{}", e),
            AppError::IoError(e) => write!(f, "I/O error: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        AppError::Store(error)
    }
}

impl From<ConsoleError> for AppError {
    fn from(error: ConsoleError) -> Self {
        AppError::Console(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        AppError::IoError(error)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error)
    }
}
