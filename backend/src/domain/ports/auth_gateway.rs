//! Driven port for the external authentication provider.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::profile::Identity;

use super::define_port_error;
use super::subscription::Subscription;

define_port_error! {
    /// Errors surfaced by the authentication provider adapter.
    pub enum AuthGatewayError {
        /// Credentials were rejected (bad password, unknown account,
        /// expired token).
        InvalidCredentials { message: String } =>
            "authentication rejected: {message}",
        /// The provider is misconfigured or unreachable.
        Provider { message: String } =>
            "auth provider failure: {message}",
    }
}

/// Port for the hosted authentication provider.
///
/// The provider owns credential verification, token issuance, and session
/// persistence; this port only reflects its outcomes. The identity-event
/// stream emits the current identity (or `None`) every time authentication
/// state changes, starting from the state at subscription time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Sign in without credentials, minting an anonymous identity.
    async fn sign_in_anonymously(&self) -> Result<Identity, AuthGatewayError>;

    /// Sign in with a pre-issued session token.
    async fn sign_in_with_token(&self, token: &str) -> Result<Identity, AuthGatewayError>;

    /// Sign in an existing email/password account.
    async fn sign_in_with_email(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Identity, AuthGatewayError>;

    /// Create and sign in a new email/password account.
    async fn sign_up_with_email(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Identity, AuthGatewayError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), AuthGatewayError>;

    /// Subscribe to authentication-state changes.
    async fn identity_events(&self) -> Result<Subscription<Option<Identity>>, AuthGatewayError>;
}
