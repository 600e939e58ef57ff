//! Session management
//!
//! Login state and the cached user profile.
//!
//! The auth checks here run entirely on the client side and are trivially
//! bypassed by anyone who can write to the store. They route a well-behaved
//! presentation layer; they are not a security boundary.

pub mod profile;
pub mod registry;
pub mod results;

pub use profile::{Role, UserProfile};
pub use registry::SessionRegistry;
pub use results::Navigation;
