//! Fan management flows: the admin listing, editing, and deleting fan
//! records, and fans editing their own profile.

#![allow(clippy::unwrap_used)]

use furiameter_app::AppState;
use furiameter_app::db::RepositoryError;
use furiameter_app::models::user::{Credentials, RegisterData, User};
use furiameter_app::services::profile::{ProfileError, ProfileUpdate};
use furiameter_core::{SocialLinks, UserId};
use furiameter_integration_tests::memory_state;

async fn registered_fan(state: &AppState, name: &str, email: &str) -> User {
    state
        .auth()
        .register(RegisterData::new(name, email, "123456"))
        .await
        .unwrap()
        .user
}

#[tokio::test]
async fn management_screen_lists_registered_fans() {
    let state = memory_state();
    registered_fan(&state, "Ana", "ana@x.com").await;
    registered_fan(&state, "Bia", "bia@x.com").await;

    let fans = state.fans().list().await.unwrap();
    let names: Vec<&str> = fans.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bia"]);
}

#[tokio::test]
async fn admin_deletes_a_fan() {
    let state = memory_state();
    let ana = registered_fan(&state, "Ana", "ana@x.com").await;
    registered_fan(&state, "Bia", "bia@x.com").await;

    state.fans().delete(&ana.id).await.unwrap();

    let fans = state.fans().list().await.unwrap();
    assert_eq!(fans.len(), 1);
    assert_eq!(fans.first().unwrap().name, "Bia");

    // The deleted fan can no longer sign in...
    assert!(
        state
            .auth()
            .sign_in(&Credentials::new("ana@x.com", "123456"))
            .await
            .is_err()
    );
    // ...and the freed email can be registered again.
    let again = registered_fan(&state, "Ana Again", "ana@x.com").await;
    assert_ne!(again.id, ana.id);
}

#[tokio::test]
async fn deleting_an_unknown_fan_is_not_found() {
    let state = memory_state();
    let err = state.fans().delete(&UserId::new("fan-99")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[tokio::test]
async fn admin_edits_a_fan_record() {
    let state = memory_state();
    let ana = registered_fan(&state, "Ana", "ana@x.com").await;

    let updated = state
        .profile()
        .update_profile(
            &ana.id,
            ProfileUpdate {
                name: Some("Ana Clara".to_owned()),
                email: Some("ana.clara@x.com".to_owned()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ana Clara");
    assert_eq!(updated.email.as_str(), "ana.clara@x.com");
    // Role is never reassigned by an edit.
    assert_eq!(updated.role, ana.role);

    // The old address is gone from the directory, the new one resolves.
    assert!(
        state
            .auth()
            .sign_in(&Credentials::new("ana@x.com", "123456"))
            .await
            .is_err()
    );
    let session = state
        .auth()
        .sign_in(&Credentials::new("ana.clara@x.com", "123456"))
        .await
        .unwrap();
    assert_eq!(session.user.id, ana.id);
}

#[tokio::test]
async fn fan_links_social_accounts_and_session_follows() {
    let state = memory_state();
    let ana = registered_fan(&state, "Ana", "ana@x.com").await;

    let social = SocialLinks {
        instagram: "@ana".to_owned(),
        twitter: "@ana_cs".to_owned(),
        steam: "ana_plays".to_owned(),
    };
    state
        .profile()
        .update_social(&ana.id, social.clone())
        .await
        .unwrap();

    // Registration signed Ana in, so the persisted session user follows.
    let restored = state.auth().restore_session().await.unwrap().unwrap();
    assert_eq!(restored.social, social);
}

#[tokio::test]
async fn edits_cannot_reuse_a_directory_email() {
    let state = memory_state();
    registered_fan(&state, "Ana", "ana@x.com").await;
    let bia = registered_fan(&state, "Bia", "bia@x.com").await;

    for taken in ["ana@x.com", "larissa@furia.gg"] {
        let err = state
            .profile()
            .update_profile(
                &bia.id,
                ProfileUpdate {
                    email: Some(taken.to_owned()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProfileError::EmailInUse));
    }
}

#[tokio::test]
async fn directory_listing_keeps_emails_unique() {
    let state = memory_state();
    for n in 0..5 {
        registered_fan(&state, &format!("Fan {n}"), &format!("fan{n}@x.com")).await;
    }
    let ana = registered_fan(&state, "Ana", "ana@x.com").await;
    state.fans().delete(&ana.id).await.unwrap();
    registered_fan(&state, "Ana Again", "ana@x.com").await;

    let users = state.directory().all_users().await.unwrap();
    let mut emails: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    emails.sort_unstable();
    let total = emails.len();
    emails.dedup();
    assert_eq!(emails.len(), total);
}
