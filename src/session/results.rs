//! Session result types
//!
//! The navigation effect an auth check hands back to the presentation layer.

/// Where the caller should go after an auth check or logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Access is allowed; stay on the current view.
    Stay,
    /// No session; go to the login entry point.
    Login,
    /// Logged in, but this view belongs to another role.
    UserDashboard,
    AdminDashboard,
}

impl Navigation {
    /// Entry point to load, if any.
    pub fn entry_point(&self) -> Option<&'static str> {
        match self {
            Navigation::Stay => None,
            Navigation::Login => Some("login.html"),
            Navigation::UserDashboard => Some("user.html"),
            Navigation::AdminDashboard => Some("admin.html"),
        }
    }

    pub fn is_allowed(&self) -> bool {
        *self == Navigation::Stay
    }
}
