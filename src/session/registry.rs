//! Session registry
//!
//! Two states: anonymous and authenticated. The login flag and the profile
//! live in the store, so a session opened in one registry is visible to every
//! other registry over the same backend.

use log::{debug, info, warn};
use serde_json::Value;

use crate::session::profile::{Role, UserProfile};
use crate::session::results::Navigation;
use crate::storage::{KeyValueStore, keys};

pub struct SessionRegistry {
    store: KeyValueStore,
    user: Option<UserProfile>,
}

impl SessionRegistry {
    pub fn new(store: KeyValueStore) -> Self {
        let mut registry = Self { store, user: None };
        registry.refresh();
        registry
    }

    fn refresh(&mut self) {
        self.user = if self.is_logged_in() {
            self.store.get(keys::USER)
        } else {
            None
        };
    }

    /// Opens (or replaces) the session for `profile`.
    ///
    /// Returns whether both the profile and the flag were written.
    pub fn login(&mut self, profile: UserProfile) -> bool {
        let stored = self.store.set(keys::USER, &profile) && self.store.set(keys::IS_LOGGED_IN, &true);
        if stored {
            info!("Logged in {} as {}", profile.email, profile.role);
        } else {
            warn!("Session for {} could not be persisted", profile.email);
        }
        self.user = Some(profile);
        stored
    }

    /// Ends the session and tells the caller to show the login entry point.
    pub fn logout(&mut self) -> Navigation {
        if let Some(user) = self.user.take() {
            info!("Logged out {}", user.email);
        }
        self.store.remove(keys::USER);
        self.store.remove(keys::IS_LOGGED_IN);
        Navigation::Login
    }

    /// The current profile, re-read from the store; `None` when anonymous.
    pub fn get_user(&mut self) -> Option<&UserProfile> {
        self.refresh();
        self.user.as_ref()
    }

    /// True only when the stored flag is the JSON boolean `true`.
    ///
    /// A string `"true"` or a number left behind by another writer does not
    /// count.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.store.get::<Value>(keys::IS_LOGGED_IN), Some(Value::Bool(true)))
    }

    /// Client-side gate: `Login` when anonymous, otherwise `Stay`.
    pub fn require_auth(&self) -> Navigation {
        if self.is_logged_in() {
            Navigation::Stay
        } else {
            debug!("Auth required; redirecting to login");
            Navigation::Login
        }
    }

    /// Client-side gate for a role-specific view.
    ///
    /// Anonymous callers go to login; users with another role go to the
    /// dashboard of their own role.
    pub fn require_role(&mut self, role: Role) -> Navigation {
        let nav = self.require_auth();
        if !nav.is_allowed() {
            return nav;
        }

        let Some(user) = self.get_user() else {
            return Navigation::Login;
        };

        if user.role == role {
            Navigation::Stay
        } else if user.is_admin() {
            Navigation::AdminDashboard
        } else {
            Navigation::UserDashboard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Role) -> UserProfile {
        UserProfile::new("ada@demo.com", None, role)
    }

    #[test]
    fn starts_anonymous() {
        let mut session = SessionRegistry::new(KeyValueStore::in_memory());
        assert!(!session.is_logged_in());
        assert_eq!(session.get_user(), None);
        assert_eq!(session.require_auth(), Navigation::Login);
    }

    #[test]
    fn login_logout_cycle() {
        let mut session = SessionRegistry::new(KeyValueStore::in_memory());
        let user = profile(Role::User);

        assert!(session.login(user.clone()));
        assert!(session.is_logged_in());
        assert_eq!(session.get_user(), Some(&user));
        assert_eq!(session.require_auth(), Navigation::Stay);

        assert_eq!(session.logout(), Navigation::Login);
        assert!(!session.is_logged_in());
        assert_eq!(session.get_user(), None);
    }

    #[test]
    fn login_again_overwrites_profile() {
        let mut session = SessionRegistry::new(KeyValueStore::in_memory());
        session.login(profile(Role::User));
        let admin = UserProfile::new("root@demo.com", Some("Root".into()), Role::Admin);
        session.login(admin.clone());

        assert_eq!(session.get_user(), Some(&admin));
    }

    #[test]
    fn only_boolean_true_counts_as_logged_in() {
        let store = KeyValueStore::in_memory();
        let session = SessionRegistry::new(store.clone());

        for planted in ["\"true\"", "1", "\"yes\"", "false", "null", "{}"] {
            store.set_raw(keys::IS_LOGGED_IN, planted).unwrap();
            assert!(!session.is_logged_in(), "{planted} must not log in");
        }

        store.set_raw(keys::IS_LOGGED_IN, "true").unwrap();
        assert!(session.is_logged_in());
    }

    #[test]
    fn profile_without_flag_is_anonymous() {
        let store = KeyValueStore::in_memory();
        store.set(keys::USER, &profile(Role::User));

        let mut session = SessionRegistry::new(store);
        assert_eq!(session.get_user(), None);
    }

    #[test]
    fn session_is_shared_through_the_store() {
        let store = KeyValueStore::in_memory();
        let mut first = SessionRegistry::new(store.clone());
        let mut second = SessionRegistry::new(store);

        first.login(profile(Role::Guest));
        assert!(second.is_logged_in());
        assert_eq!(second.get_user().map(|u| u.role), Some(Role::Guest));

        second.logout();
        assert!(!first.is_logged_in());
    }

    #[test]
    fn role_routing() {
        let mut session = SessionRegistry::new(KeyValueStore::in_memory());
        assert_eq!(session.require_role(Role::Admin), Navigation::Login);

        session.login(profile(Role::User));
        assert_eq!(session.require_role(Role::User), Navigation::Stay);
        assert_eq!(session.require_role(Role::Admin), Navigation::UserDashboard);

        session.login(profile(Role::Admin));
        assert_eq!(session.require_role(Role::Admin), Navigation::Stay);
        assert_eq!(session.require_role(Role::User), Navigation::AdminDashboard);
    }
}
