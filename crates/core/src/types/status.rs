//! Interaction status lifecycle.

use serde::{Deserialize, Serialize};

/// Error returned when an illegal status change is requested.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot move interaction from {from} to {to}")]
pub struct StatusError {
    /// Status the interaction currently holds.
    pub from: InteractionStatus,
    /// Status the caller asked for.
    pub to: InteractionStatus,
}

/// Review status of an interaction.
///
/// Every interaction starts `Pending`. Staff or the admin move it to
/// `Confirmed` or `Cancelled`; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InteractionStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl InteractionStatus {
    /// Whether no further transition is allowed out of this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }

    /// Validate a transition from `self` to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError`] unless `self` is `Pending` and `next` is a
    /// terminal status.
    pub const fn transition_to(self, next: Self) -> Result<Self, StatusError> {
        match (self, next) {
            (Self::Pending, Self::Confirmed | Self::Cancelled) => Ok(next),
            (from, to) => Err(StatusError { from, to }),
        }
    }
}

impl std::fmt::Display for InteractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for InteractionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid interaction status: {s}")),
        }
    }
}
