//! Tests for the session resolver.

use std::sync::Arc;

use chrono::Utc;

use super::*;
use crate::domain::ports::{
    MockAuthGateway, MockProfileRepository, ProfileRepositoryError,
};
use crate::domain::profile::{IdentityUid, StudentId};
use crate::domain::ErrorCode;

fn identity() -> Identity {
    Identity {
        uid: IdentityUid::new("uid-1").expect("uid"),
        email: Some("jane@kisii.ac.ke".to_owned()),
        anonymous: false,
    }
}

fn student_profile() -> Profile {
    Profile {
        uid: IdentityUid::new("uid-1").expect("uid"),
        email: Some("jane@kisii.ac.ke".to_owned()),
        name: "Jane Moraa".to_owned(),
        role: Role::Student {
            student_id: StudentId::new("KNP/001/2025").expect("student id"),
        },
        created_at: Utc::now(),
    }
}

fn resolver(
    auth: MockAuthGateway,
    profiles: MockProfileRepository,
    token: Option<&str>,
) -> SessionResolver<MockAuthGateway, MockProfileRepository> {
    SessionResolver::new(Arc::new(auth), Arc::new(profiles), token.map(str::to_owned))
}

#[tokio::test]
async fn signed_out_when_no_identity() {
    let resolver = resolver(MockAuthGateway::new(), MockProfileRepository::new(), None);
    assert_eq!(resolver.resolve(None).await, SessionState::SignedOut);
}

#[tokio::test]
async fn active_with_exactly_one_lookup_when_profile_exists() {
    let mut profiles = MockProfileRepository::new();
    let profile = student_profile();
    let returned = profile.clone();
    profiles
        .expect_find_by_uid()
        .times(1)
        .return_once(move |_| Ok(Some(returned)));

    let resolver = resolver(MockAuthGateway::new(), profiles, None);
    let state = resolver.resolve(Some(identity())).await;
    assert_eq!(state, SessionState::Active { profile });
}

#[tokio::test]
async fn profile_setup_when_identity_has_no_profile() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_uid()
        .times(1)
        .return_once(|_| Ok(None));

    let resolver = resolver(MockAuthGateway::new(), profiles, None);
    let state = resolver.resolve(Some(identity())).await;
    assert_eq!(
        state,
        SessionState::ProfileSetup {
            identity: identity()
        }
    );
}

#[tokio::test]
async fn unavailable_after_bounded_retries() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_find_by_uid()
        .times(3)
        .returning(|_| Err(ProfileRepositoryError::connection("store down")));

    let resolver = resolver(MockAuthGateway::new(), profiles, None);
    match resolver.resolve(Some(identity())).await {
        SessionState::Unavailable { error } => {
            assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn recovers_when_a_retry_succeeds() {
    let mut profiles = MockProfileRepository::new();
    let mut calls = 0_u32;
    let profile = student_profile();
    let returned = profile.clone();
    profiles.expect_find_by_uid().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Err(ProfileRepositoryError::connection("blip"))
        } else {
            Ok(Some(returned.clone()))
        }
    });

    let resolver = resolver(MockAuthGateway::new(), profiles, None);
    let state = resolver.resolve(Some(identity())).await;
    assert_eq!(state, SessionState::Active { profile });
}

#[tokio::test]
async fn bootstrap_redeems_configured_token() {
    let mut auth = MockAuthGateway::new();
    auth.expect_sign_in_with_token()
        .withf(|token| token == "issued-token")
        .times(1)
        .return_once(|_| Ok(identity()));
    auth.expect_sign_in_anonymously().times(0);

    let resolver = resolver(auth, MockProfileRepository::new(), Some("issued-token"));
    let signed_in = resolver.bootstrap().await.expect("bootstrap succeeds");
    assert_eq!(signed_in, identity());
}

#[tokio::test]
async fn bootstrap_falls_back_to_anonymous() {
    let mut auth = MockAuthGateway::new();
    auth.expect_sign_in_anonymously().times(1).return_once(|| {
        Ok(Identity {
            uid: IdentityUid::new("anon-1").expect("uid"),
            email: None,
            anonymous: true,
        })
    });

    let resolver = resolver(auth, MockProfileRepository::new(), None);
    let signed_in = resolver.bootstrap().await.expect("bootstrap succeeds");
    assert!(signed_in.anonymous);
}

#[tokio::test]
async fn sign_in_maps_rejection_to_unauthorized() {
    let mut auth = MockAuthGateway::new();
    auth.expect_sign_in_with_email()
        .times(1)
        .return_once(|_| Err(AuthGatewayError::invalid_credentials("wrong password")));

    let resolver = resolver(auth, MockProfileRepository::new(), None);
    let credentials =
        LoginCredentials::try_from_parts("jane@kisii.ac.ke", "nope").expect("credentials");
    let error = resolver
        .sign_in(&credentials)
        .await
        .expect_err("sign-in fails");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[tokio::test]
async fn create_profile_persists_draft() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_create()
        .withf(|draft: &ProfileDraft| {
            draft.name == "Jane Moraa" && draft.uid.as_str() == "uid-1"
        })
        .times(1)
        .return_once(|draft| {
            Ok(Profile {
                uid: draft.uid,
                email: draft.email,
                name: draft.name,
                role: draft.role,
                created_at: Utc::now(),
            })
        });

    let resolver = resolver(MockAuthGateway::new(), profiles, None);
    let profile = resolver
        .create_profile(&identity(), "  Jane Moraa  ", Role::Admin)
        .await
        .expect("profile created");
    assert_eq!(profile.role, Role::Admin);
}

#[tokio::test]
async fn create_profile_surfaces_duplicate_as_conflict() {
    let mut profiles = MockProfileRepository::new();
    profiles
        .expect_create()
        .times(1)
        .return_once(|_| Err(ProfileRepositoryError::already_exists("uid-1")));

    let resolver = resolver(MockAuthGateway::new(), profiles, None);
    let error = resolver
        .create_profile(&identity(), "Jane Moraa", Role::Admin)
        .await
        .expect_err("duplicate profile");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn create_profile_rejects_blank_name_without_write() {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_create().times(0);

    let resolver = resolver(MockAuthGateway::new(), profiles, None);
    let error = resolver
        .create_profile(&identity(), "   ", Role::Admin)
        .await
        .expect_err("blank name");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}
