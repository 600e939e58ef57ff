//! Persisted key names
//!
//! Changing any of these orphans previously persisted data.

/// JSON array of file records
pub const FILES: &str = "files";

/// JSON user profile of the current session
pub const USER: &str = "user";

/// JSON boolean login flag
pub const IS_LOGGED_IN: &str = "isLoggedIn";

/// `dark` or `light`. Written as a JSON string; a bare `light` is read too
pub const THEME: &str = "theme";

/// Last email entered on the login form. Written as a JSON string; bare
/// text is read too
pub const SAVED_EMAIL: &str = "savedEmail";
