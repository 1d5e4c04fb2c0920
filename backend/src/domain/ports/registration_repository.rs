//! Driven port for registration document storage.

use async_trait::async_trait;

use crate::domain::profile::StudentId;
use crate::domain::registration::{Registration, RegistrationDraft, RegistrationId};

use super::define_port_error;
use super::subscription::Subscription;

define_port_error! {
    /// Errors surfaced by the registration store adapter.
    pub enum RegistrationRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "registration store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "registration store query failed: {message}",
        /// The (student, exam) pair is already registered.
        Duplicate { student_id: String, exam_id: String } =>
            "student {student_id} already registered for exam {exam_id}",
        /// The referenced registration no longer exists.
        NotFound { registration_id: String } =>
            "registration {registration_id} not found",
        /// The registration was already marked paid.
        AlreadyPaid { registration_id: String } =>
            "registration {registration_id} is already paid",
    }
}

/// Port for registration documents.
///
/// `insert_unique` must be a transactional check-and-insert: at most one
/// registration may exist per (student id, exam id) pair, and concurrent
/// inserts for the same pair must resolve to exactly one winner. This is a
/// guarantee the storage collaborator provides; the client-side cache check
/// in the registration workflow is only an optimistic fast path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Atomically verify uniqueness and insert a `pending` registration with
    /// a server-assigned creation timestamp.
    async fn insert_unique(
        &self,
        draft: RegistrationDraft,
    ) -> Result<Registration, RegistrationRepositoryError>;

    /// Transition a registration to `paid`, stamping the payment time.
    /// The transition happens at most once.
    async fn mark_paid(
        &self,
        registration_id: &RegistrationId,
    ) -> Result<Registration, RegistrationRepositoryError>;

    /// Subscribe to every registration, snapshot-per-change.
    async fn watch_all(&self)
        -> Result<Subscription<Vec<Registration>>, RegistrationRepositoryError>;

    /// Subscribe to one student's registrations, filtered store-side by
    /// student-id equality.
    async fn watch_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Subscription<Vec<Registration>>, RegistrationRepositoryError>;
}
