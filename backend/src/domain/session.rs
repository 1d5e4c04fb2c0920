//! Session resolution: from authentication events to a portal session.
//!
//! The resolver listens to the auth gateway's identity stream and, for each
//! transition, derives one of the [`SessionState`] outcomes by performing at
//! most one profile lookup. It never polls; a bounded retry only kicks in
//! when the lookup itself fails, after which the failure becomes an explicit
//! [`SessionState::Unavailable`] outcome instead of an indefinite loading
//! state.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::auth::LoginCredentials;
use crate::domain::ports::{
    AuthGateway, AuthGatewayError, ProfileRepository, ProfileRepositoryError, Subscription,
};
use crate::domain::profile::{Identity, Profile, ProfileDraft, Role};
use crate::domain::Error;

/// Attempts made to fetch a profile before giving up on a sign-in event.
const PROFILE_FETCH_ATTEMPTS: u32 = 3;

/// Outcome of resolving one authentication-state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No identity is signed in.
    SignedOut,
    /// An identity is signed in but has not completed profile setup.
    ProfileSetup {
        /// The signed-in identity awaiting a profile.
        identity: Identity,
    },
    /// An identity is signed in and its profile is loaded.
    Active {
        /// The resolved profile.
        profile: Profile,
    },
    /// The profile could not be fetched after bounded retries.
    Unavailable {
        /// The failure to surface in an error view.
        error: Error,
    },
}

/// Resolves authentication transitions against the profile store.
#[derive(Clone)]
pub struct SessionResolver<A, P> {
    auth: Arc<A>,
    profiles: Arc<P>,
    initial_auth_token: Option<String>,
}

impl<A, P> SessionResolver<A, P> {
    /// Create a resolver over the auth gateway and profile repository.
    ///
    /// `initial_auth_token` is the optional pre-issued session token from
    /// the portal configuration; when present, [`Self::bootstrap`] redeems
    /// it instead of signing in anonymously.
    pub fn new(auth: Arc<A>, profiles: Arc<P>, initial_auth_token: Option<String>) -> Self {
        Self {
            auth,
            profiles,
            initial_auth_token,
        }
    }
}

fn map_auth_error(error: AuthGatewayError) -> Error {
    match error {
        AuthGatewayError::InvalidCredentials { message } => Error::unauthorized(message),
        AuthGatewayError::Provider { message } => {
            Error::service_unavailable(format!("auth provider failure: {message}"))
        }
    }
}

fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile store unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
        ProfileRepositoryError::AlreadyExists { uid } => {
            Error::conflict(format!("a profile already exists for identity {uid}"))
        }
    }
}

impl<A, P> SessionResolver<A, P>
where
    A: AuthGateway,
    P: ProfileRepository,
{
    /// Establish the startup session: redeem the configured token when one
    /// exists, otherwise sign in anonymously.
    pub async fn bootstrap(&self) -> Result<Identity, Error> {
        let identity = match self.initial_auth_token.as_deref() {
            Some(token) => {
                let identity = self
                    .auth
                    .sign_in_with_token(token)
                    .await
                    .map_err(map_auth_error)?;
                info!(uid = %identity.uid, "signed in with pre-issued token");
                identity
            }
            None => {
                let identity = self
                    .auth
                    .sign_in_anonymously()
                    .await
                    .map_err(map_auth_error)?;
                info!(uid = %identity.uid, "signed in anonymously");
                identity
            }
        };
        Ok(identity)
    }

    /// Subscribe to authentication-state transitions.
    pub async fn identity_events(&self) -> Result<Subscription<Option<Identity>>, Error> {
        self.auth.identity_events().await.map_err(map_auth_error)
    }

    /// Derive the session state for one authentication transition.
    ///
    /// Performs exactly one profile lookup per sign-in event on the success
    /// path; lookups are retried up to [`PROFILE_FETCH_ATTEMPTS`] times only
    /// when the store itself fails.
    pub async fn resolve(&self, identity: Option<Identity>) -> SessionState {
        let Some(identity) = identity else {
            return SessionState::SignedOut;
        };

        let mut last_error = None;
        for attempt in 1..=PROFILE_FETCH_ATTEMPTS {
            match self.profiles.find_by_uid(&identity.uid).await {
                Ok(Some(profile)) => return SessionState::Active { profile },
                Ok(None) => return SessionState::ProfileSetup { identity },
                Err(error) => {
                    warn!(
                        uid = %identity.uid,
                        attempt,
                        error = %error,
                        "profile fetch failed"
                    );
                    last_error = Some(error);
                }
            }
        }

        let error = last_error.map_or_else(
            || Error::internal("profile fetch failed without a recorded error"),
            map_profile_error,
        );
        SessionState::Unavailable { error }
    }

    /// Persist a newly chosen profile for a signed-in identity.
    ///
    /// The role defaults to student in the setup flow; it is immutable once
    /// written, and the store refuses a second profile for the same uid.
    pub async fn create_profile(
        &self,
        identity: &Identity,
        name: &str,
        role: Role,
    ) -> Result<Profile, Error> {
        let draft = ProfileDraft::try_new(identity, name, role)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let profile = self
            .profiles
            .create(draft)
            .await
            .map_err(map_profile_error)?;
        info!(uid = %profile.uid, role = profile.role.label(), "profile created");
        Ok(profile)
    }

    /// Sign in an existing email/password account.
    pub async fn sign_in(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        self.auth
            .sign_in_with_email(credentials)
            .await
            .map_err(map_auth_error)
    }

    /// Create and sign in a new email/password account.
    pub async fn sign_up(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        self.auth
            .sign_up_with_email(credentials)
            .await
            .map_err(map_auth_error)
    }

    /// End the current session.
    pub async fn sign_out(&self) -> Result<(), Error> {
        self.auth.sign_out().await.map_err(map_auth_error)?;
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
