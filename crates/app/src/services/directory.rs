//! Identity directory.
//!
//! The combined set of identities resolvable at sign-in: one fixed admin,
//! a fixed staff roster, and the registered fans. The fixed identities are
//! baked in; the fan set is read from storage on every resolution, so
//! resolving is a pure function of persisted state and the given
//! credentials.
//!
//! # Mock credential boundary
//!
//! Every identity shares one deployment-wide password. This is an
//! explicit stand-in for a real credential-verification service - it keeps
//! the session and repository layers testable without a network - and is
//! exactly as secure as it sounds, which is fine for a local demo
//! directory and nothing else.

use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{debug, instrument};

use furiameter_core::{Email, EmailError, SocialLinks, UserId, UserRole};

use crate::db::{FanRepository, RepositoryError};
use crate::models::user::{Credentials, RegisterData, User};

/// The single shared mock password.
pub const SHARED_PASSWORD: &str = "123456";

/// Errors that can occur during directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Invalid email format on registration.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No identity matches the given credentials.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The email already belongs to an identity.
    #[error("email already in use")]
    EmailInUse,

    /// Fan repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// The identity directory.
///
/// Constructed once per process and shared by handle; there are no hidden
/// module-level identity lists.
#[derive(Debug, Clone)]
pub struct IdentityDirectory {
    fans: FanRepository,
}

impl IdentityDirectory {
    /// Create a directory over the registered-fan repository.
    #[must_use]
    pub const fn new(fans: FanRepository) -> Self {
        Self { fans }
    }

    /// The fixed admin identity.
    #[must_use]
    pub fn admin() -> User {
        User {
            id: UserId::new("admin"),
            name: "Admin FURIA".to_owned(),
            email: Email::from_trusted("admin@furia.gg"),
            role: UserRole::Admin,
            image: "https://randomuser.me/api/portraits/men/3.jpg".to_owned(),
            social: SocialLinks::default(),
        }
    }

    /// The fixed staff roster.
    #[must_use]
    pub fn staff() -> Vec<User> {
        vec![
            User {
                id: UserId::new("staff-1"),
                name: "Rafael Castello".to_owned(),
                email: Email::from_trusted("rafael@furia.gg"),
                role: UserRole::Staff,
                image: "https://randomuser.me/api/portraits/men/5.jpg".to_owned(),
                social: SocialLinks::default(),
            },
            User {
                id: UserId::new("staff-2"),
                name: "Larissa Martins".to_owned(),
                email: Email::from_trusted("larissa@furia.gg"),
                role: UserRole::Staff,
                image: "https://randomuser.me/api/portraits/women/6.jpg".to_owned(),
                social: SocialLinks::default(),
            },
        ]
    }

    /// Resolve credentials to an identity.
    ///
    /// Checks the admin first, then the staff roster, then the registered
    /// fans; the first exact email match wins.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidCredentials` when no identity
    /// matches, or `DirectoryError::Repository` if the fan set cannot be
    /// read.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn resolve(&self, credentials: &Credentials) -> Result<User, DirectoryError> {
        if credentials.password.expose_secret() != SHARED_PASSWORD {
            return Err(DirectoryError::InvalidCredentials);
        }

        let admin = Self::admin();
        if admin.email.as_str() == credentials.email {
            return Ok(admin);
        }

        if let Some(staff) = Self::staff()
            .into_iter()
            .find(|s| s.email.as_str() == credentials.email)
        {
            return Ok(staff);
        }

        if let Some(fan) = self.fans.find_by_email(&credentials.email).await? {
            return Ok(fan);
        }

        Err(DirectoryError::InvalidCredentials)
    }

    /// Register a new fan.
    ///
    /// The chosen password is accepted and discarded - sign-in goes
    /// through the shared mock credential. The new fan ID is `fan-N`
    /// where N is one past the highest existing numeric suffix, so IDs
    /// stay unique even after fans have been deleted.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidEmail` if the email does not parse,
    /// `DirectoryError::EmailInUse` if it belongs to any identity, or
    /// `DirectoryError::Repository` on storage failure.
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn register(&self, data: RegisterData) -> Result<User, DirectoryError> {
        let email = Email::parse(&data.email)?;

        if self.email_in_use(email.as_str(), None).await? {
            return Err(DirectoryError::EmailInUse);
        }

        let fans = self.fans.list().await?;
        let ordinal = next_fan_ordinal(&fans);
        let fan = User {
            id: UserId::new(format!("fan-{ordinal}")),
            name: data.name,
            email,
            role: UserRole::Fan,
            image: avatar_url(ordinal),
            social: SocialLinks::default(),
        };

        let fan = self.fans.create(fan).await?;
        debug!(id = %fan.id, "fan registered");
        Ok(fan)
    }

    /// Whether `email` belongs to any identity, optionally ignoring one
    /// fan (used when that fan is editing their own address).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the fan set cannot be read.
    pub async fn email_in_use(
        &self,
        email: &str,
        excluding: Option<&UserId>,
    ) -> Result<bool, RepositoryError> {
        if Self::admin().email.as_str() == email {
            return Ok(true);
        }
        if Self::staff().iter().any(|s| s.email.as_str() == email) {
            return Ok(true);
        }
        let fans = self.fans.list().await?;
        Ok(fans
            .iter()
            .any(|f| f.email.as_str() == email && Some(&f.id) != excluding))
    }

    /// Every resolvable non-admin identity: the staff roster followed by
    /// the registered fans.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the fan set cannot be read.
    pub async fn all_users(&self) -> Result<Vec<User>, RepositoryError> {
        let mut users = Self::staff();
        users.extend(self.fans.list().await?);
        Ok(users)
    }

    /// The registered fans.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the fan set cannot be read.
    pub async fn fans(&self) -> Result<Vec<User>, RepositoryError> {
        self.fans.list().await
    }
}

/// One past the highest numeric suffix among existing `fan-N` IDs.
fn next_fan_ordinal(fans: &[User]) -> u64 {
    fans.iter()
        .filter_map(|f| f.id.as_str().strip_prefix("fan-")?.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

/// Placeholder avatar for the Nth registered fan.
fn avatar_url(ordinal: u64) -> String {
    let gallery = if ordinal % 2 == 0 { "women" } else { "men" };
    format!(
        "https://randomuser.me/api/portraits/{gallery}/{}.jpg",
        ordinal + 9
    )
}
