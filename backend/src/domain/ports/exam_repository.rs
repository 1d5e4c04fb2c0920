//! Driven port for the shared exam catalogue.

use async_trait::async_trait;

use crate::domain::exam::{Exam, ExamDraft, ExamId};

use super::define_port_error;
use super::subscription::Subscription;

define_port_error! {
    /// Errors surfaced by the catalogue store adapter.
    pub enum ExamRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "exam store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "exam store query failed: {message}",
        /// The referenced exam no longer exists.
        NotFound { exam_id: String } =>
            "exam {exam_id} not found",
    }
}

/// Port for exam catalogue documents.
///
/// Timestamps are server-assigned: `insert` stamps both `created_at` and
/// `last_updated`, `update` preserves `created_at` and refreshes
/// `last_updated`. Deletion does not cascade to registrations referencing
/// the exam; they are left orphaned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExamRepository: Send + Sync {
    /// Insert a new exam, assigning an id and creation timestamp.
    async fn insert(&self, draft: ExamDraft) -> Result<Exam, ExamRepositoryError>;

    /// Replace the fields of an existing exam.
    async fn update(&self, exam_id: &ExamId, draft: ExamDraft)
        -> Result<Exam, ExamRepositoryError>;

    /// Irreversibly remove an exam document.
    async fn delete(&self, exam_id: &ExamId) -> Result<(), ExamRepositoryError>;

    /// Subscribe to the full catalogue, snapshot-per-change.
    async fn watch_all(&self) -> Result<Subscription<Vec<Exam>>, ExamRepositoryError>;
}
