//! Interaction domain types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use furiameter_core::{InteractionId, InteractionStatus, UserId};

use crate::models::user::User;

/// A recorded fan-engagement event.
///
/// This is the superset of the two historical record shapes: fan-logged
/// events carry `kind` and `points`, staff-logged events add a time and a
/// free-form description. Records are append-only at creation; only
/// `status` changes afterwards, through a review transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Globally unique, assigned at creation, never reused.
    pub id: InteractionId,
    /// Fan or staff member who recorded the event.
    pub owner_id: UserId,
    /// Owner display name captured at creation time, so listings do not
    /// need a directory lookup (and survive the owner's deletion).
    pub owner_name: String,
    /// What happened, e.g. "quiz", "stream", "chat".
    pub kind: String,
    /// Day the event happened.
    pub date: NaiveDate,
    /// Time of day, when the reporter recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Free-form notes, when the reporter recorded any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Engagement points awarded once confirmed.
    pub points: i64,
    /// Review status.
    pub status: InteractionStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new interaction.
#[derive(Debug, Clone)]
pub struct InteractionDraft {
    /// What happened.
    pub kind: String,
    /// Day the event happened.
    pub date: NaiveDate,
    /// Optional time of day.
    pub time: Option<NaiveTime>,
    /// Optional free-form notes.
    pub description: Option<String>,
    /// Points to award once confirmed.
    pub points: i64,
}

impl InteractionDraft {
    /// Build a minimal draft; time and description default to `None`.
    pub fn new(kind: impl Into<String>, date: NaiveDate, points: i64) -> Self {
        Self {
            kind: kind.into(),
            date,
            time: None,
            description: None,
            points,
        }
    }
}

impl Interaction {
    /// Stamp `draft` into a full pending record owned by `owner`.
    #[must_use]
    pub fn record(owner: &User, draft: InteractionDraft) -> Self {
        Self {
            id: InteractionId::generate(),
            owner_id: owner.id.clone(),
            owner_name: owner.name.clone(),
            kind: draft.kind,
            date: draft.date,
            time: draft.time,
            description: draft.description,
            points: draft.points,
            status: InteractionStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use furiameter_core::{Email, SocialLinks, UserRole};

    use super::*;

    fn fan() -> User {
        User {
            id: UserId::new("fan-1"),
            name: "Ana".to_owned(),
            email: Email::parse("ana@x.com").unwrap(),
            role: UserRole::Fan,
            image: String::new(),
            social: SocialLinks::default(),
        }
    }

    #[test]
    fn test_record_starts_pending_with_fresh_id() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let a = Interaction::record(&fan(), InteractionDraft::new("quiz", date, 10));
        let b = Interaction::record(&fan(), InteractionDraft::new("quiz", date, 10));

        assert_eq!(a.status, InteractionStatus::Pending);
        assert_eq!(a.owner_id, UserId::new("fan-1"));
        assert_eq!(a.owner_name, "Ana");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_optional_fields_are_omitted_from_json() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let interaction = Interaction::record(&fan(), InteractionDraft::new("quiz", date, 10));

        let json = serde_json::to_string(&interaction).unwrap();
        assert!(!json.contains("\"time\""));
        assert!(!json.contains("\"description\""));
    }

    #[test]
    fn test_staff_shaped_record_roundtrips() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let mut draft = InteractionDraft::new("meet-and-greet", date, 50);
        draft.time = NaiveTime::from_hms_opt(18, 30, 0);
        draft.description = Some("Joined the post-match Q&A".to_owned());

        let interaction = Interaction::record(&fan(), draft);
        let json = serde_json::to_string(&interaction).unwrap();
        let parsed: Interaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, interaction);
    }
}
