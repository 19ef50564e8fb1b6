//! User roles.

use serde::{Deserialize, Serialize};

/// Role of an identity in the directory.
///
/// A role is assigned when the identity is created and never reassigned.
/// Exactly one admin exists; the staff roster is fixed; fans are created
/// through registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// The single fixed administrator.
    Admin,
    /// A member of the fixed staff roster.
    Staff,
    /// A registered fan.
    Fan,
}

impl UserRole {
    /// Whether identities with this role can be edited or deleted at runtime.
    ///
    /// Only fans are mutable; the admin and staff roster are fixed.
    #[must_use]
    pub const fn is_mutable(self) -> bool {
        matches!(self, Self::Fan)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
            Self::Fan => write!(f, "fan"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            "fan" => Ok(Self::Fan),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}
