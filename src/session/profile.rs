//! Module `profile`
//!
//! The user profile cached for the current session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "guest" => Ok(Role::Guest),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Who is logged in, as remembered by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(with = "timestamp")]
    pub login_time: DateTime<Utc>,
}

impl UserProfile {
    /// Builds a profile stamped with the current time.
    ///
    /// Without a display name the local part of the email is used.
    pub fn new(email: impl Into<String>, name: Option<String>, role: Role) -> Self {
        let email = email.into();
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| default_name(&email));

        Self {
            email,
            name,
            role,
            login_time: timestamp::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

fn default_name(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}
