//! Social media handles linked to a fan profile.

use serde::{Deserialize, Serialize};

/// Social media handles a fan has connected to their profile.
///
/// All fields are plain handles (e.g. `@ana`), empty until the fan links
/// the account. Stored inline on the [`User`](crate::types) record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    /// Instagram handle.
    #[serde(default)]
    pub instagram: String,
    /// Twitter / X handle.
    #[serde(default)]
    pub twitter: String,
    /// Steam profile name.
    #[serde(default)]
    pub steam: String,
}

impl SocialLinks {
    /// Whether no handle has been linked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instagram.is_empty() && self.twitter.is_empty() && self.steam.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(SocialLinks::default().is_empty());
    }

    #[test]
    fn test_missing_fields_deserialize_to_empty() {
        let links: SocialLinks = serde_json::from_str(r#"{"instagram":"@ana"}"#).unwrap();
        assert_eq!(links.instagram, "@ana");
        assert_eq!(links.twitter, "");
        assert!(!links.is_empty());
    }
}
