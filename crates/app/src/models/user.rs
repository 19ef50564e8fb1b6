//! User domain types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use furiameter_core::{Email, SocialLinks, UserId, UserRole};

/// A directory identity: the admin, a staff member, or a registered fan.
///
/// The admin and staff roster are fixed at build time; fans are created
/// through registration and are the only identities that can be edited or
/// deleted. A role is never reassigned after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique ID, structured by role (`admin`, `staff-N`, `fan-N`).
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique across the whole directory.
    pub email: Email,
    /// Role assigned at creation.
    pub role: UserRole,
    /// Avatar URL shown in listings.
    pub image: String,
    /// Linked social accounts. Empty until the fan connects them.
    #[serde(default)]
    pub social: SocialLinks,
}

impl User {
    /// Whether this identity may review interaction statuses.
    #[must_use]
    pub const fn can_review(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Staff)
    }
}

/// Sign-in input.
///
/// The password is held as a [`SecretString`] so it never appears in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Email address as typed.
    pub email: String,
    /// Password as typed.
    pub password: SecretString,
}

impl Credentials {
    /// Build credentials from raw input.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Registration input for a new fan.
#[derive(Debug, Clone)]
pub struct RegisterData {
    /// Display name.
    pub name: String,
    /// Email address as typed; validated and uniqueness-checked on register.
    pub email: String,
    /// Chosen password. Accepted but not stored: the directory runs on one
    /// shared mock credential per deployment (see
    /// [`services::directory`](crate::services::directory)).
    pub password: SecretString,
}

impl RegisterData {
    /// Build registration data from raw input.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}
