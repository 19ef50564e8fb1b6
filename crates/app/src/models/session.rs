//! Session-related types.

use serde::{Deserialize, Serialize};

use furiameter_core::UserRole;

use crate::models::user::User;

/// The authenticated identity plus its opaque capability token.
///
/// At most one session is current per process, persisted under the keys in
/// [`keys`] so it survives restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The signed-in identity.
    pub user: User,
    /// Role-tagged token. A local capability marker only - it is never
    /// cryptographically verified.
    pub token: String,
}

impl Session {
    /// Open a session for `user`, minting its token.
    #[must_use]
    pub fn open(user: User) -> Self {
        let token = token_for(&user);
        Self { user, token }
    }
}

/// Mint the role-tagged session token for `user`.
///
/// The prefix encodes role provenance (`admin-token`, `staff-token-N`,
/// `fan-token-N`); nothing else about the token is meaningful.
#[must_use]
pub fn token_for(user: &User) -> String {
    match user.role {
        UserRole::Admin => "admin-token".to_owned(),
        UserRole::Staff => format!("staff-token-{}", user.id),
        UserRole::Fan => format!("fan-token-{}", user.id),
    }
}

/// Storage keys for persisted session state.
pub mod keys {
    /// Key for the signed-in user record.
    pub const SESSION_USER: &str = "session_user";

    /// Key for the session token.
    pub const SESSION_TOKEN: &str = "session_token";
}
