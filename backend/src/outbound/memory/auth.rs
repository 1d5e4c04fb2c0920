//! In-process authentication gateway adapter.
//!
//! Supports the same sign-in surface as the hosted provider (anonymous,
//! pre-issued token, email/password) and pushes authentication-state
//! transitions through a watch channel, starting from the state at
//! subscription time.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::info;

use crate::domain::auth::LoginCredentials;
use crate::domain::ports::{AuthGateway, AuthGatewayError, Subscription};
use crate::domain::profile::{Identity, IdentityUid};

struct Account {
    uid: IdentityUid,
    password: String,
}

/// In-memory authentication provider.
pub struct MemoryAuthGateway {
    accounts: Mutex<HashMap<String, Account>>,
    tokens: Mutex<HashMap<String, IdentityUid>>,
    current: watch::Sender<Option<Identity>>,
}

impl MemoryAuthGateway {
    /// Create a provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            accounts: Mutex::new(HashMap::new()),
            tokens: Mutex::new(HashMap::new()),
            current,
        }
    }

    /// Pre-issue a session token redeemable via token sign-in, as the
    /// hosting environment would inject one.
    pub fn issue_token(&self, token: impl Into<String>) -> Result<IdentityUid, AuthGatewayError> {
        let uid = IdentityUid::random();
        self.lock_tokens()?.insert(token.into(), uid.clone());
        Ok(uid)
    }

    fn lock_accounts(&self) -> Result<MutexGuard<'_, HashMap<String, Account>>, AuthGatewayError> {
        self.accounts
            .lock()
            .map_err(|_| AuthGatewayError::provider("account table mutex poisoned"))
    }

    fn lock_tokens(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, IdentityUid>>, AuthGatewayError> {
        self.tokens
            .lock()
            .map_err(|_| AuthGatewayError::provider("token table mutex poisoned"))
    }

    fn announce(&self, identity: Identity) -> Identity {
        self.current.send_replace(Some(identity.clone()));
        identity
    }
}

impl Default for MemoryAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for MemoryAuthGateway {
    async fn sign_in_anonymously(&self) -> Result<Identity, AuthGatewayError> {
        let identity = Identity {
            uid: IdentityUid::random(),
            email: None,
            anonymous: true,
        };
        info!(uid = %identity.uid, "anonymous sign-in");
        Ok(self.announce(identity))
    }

    async fn sign_in_with_token(&self, token: &str) -> Result<Identity, AuthGatewayError> {
        let uid = self
            .lock_tokens()?
            .get(token)
            .cloned()
            .ok_or_else(|| AuthGatewayError::invalid_credentials("unknown or expired token"))?;
        let identity = Identity {
            uid,
            email: None,
            anonymous: false,
        };
        info!(uid = %identity.uid, "token sign-in");
        Ok(self.announce(identity))
    }

    async fn sign_in_with_email(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Identity, AuthGatewayError> {
        let accounts = self.lock_accounts()?;
        let account = accounts
            .get(credentials.email())
            .filter(|account| account.password == credentials.password())
            .ok_or_else(|| {
                AuthGatewayError::invalid_credentials("unknown email or wrong password")
            })?;
        let identity = Identity {
            uid: account.uid.clone(),
            email: Some(credentials.email().to_owned()),
            anonymous: false,
        };
        drop(accounts);
        info!(uid = %identity.uid, "email sign-in");
        Ok(self.announce(identity))
    }

    async fn sign_up_with_email(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Identity, AuthGatewayError> {
        let mut accounts = self.lock_accounts()?;
        if accounts.contains_key(credentials.email()) {
            return Err(AuthGatewayError::invalid_credentials(
                "email already in use",
            ));
        }

        let uid = IdentityUid::random();
        accounts.insert(
            credentials.email().to_owned(),
            Account {
                uid: uid.clone(),
                password: credentials.password().to_owned(),
            },
        );
        drop(accounts);

        let identity = Identity {
            uid,
            email: Some(credentials.email().to_owned()),
            anonymous: false,
        };
        info!(uid = %identity.uid, "account created");
        Ok(self.announce(identity))
    }

    async fn sign_out(&self) -> Result<(), AuthGatewayError> {
        self.current.send_replace(None);
        info!("signed out");
        Ok(())
    }

    async fn identity_events(&self) -> Result<Subscription<Option<Identity>>, AuthGatewayError> {
        Ok(Subscription::new(self.current.subscribe()))
    }
}
