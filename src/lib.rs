pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod preferences;
pub mod session;
pub mod storage;
pub mod utils;

pub use catalog::FileCatalog;
pub use console::Console;
pub use preferences::Preferences;
pub use session::SessionRegistry;
pub use storage::KeyValueStore;
