//! Driven port for profile document storage.

use async_trait::async_trait;

use crate::domain::profile::{IdentityUid, Profile, ProfileDraft};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by the profile store adapter.
    pub enum ProfileRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "profile store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "profile store query failed: {message}",
        /// A profile already exists for this identity.
        AlreadyExists { uid: String } =>
            "profile already exists for identity {uid}",
    }
}

/// Port for profile documents, keyed by the identity's durable uid.
///
/// The store guarantees at most one profile per identity: `create` fails
/// with [`ProfileRepositoryError::AlreadyExists`] rather than overwriting.
/// Profiles are never deleted and carry no update path; the role is
/// immutable once written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile for an identity, if one was ever created.
    async fn find_by_uid(&self, uid: &IdentityUid)
        -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Persist a new profile, stamping a server-assigned creation time.
    async fn create(&self, draft: ProfileDraft) -> Result<Profile, ProfileRepositoryError>;
}
