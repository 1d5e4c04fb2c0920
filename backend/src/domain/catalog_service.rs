//! Admin-facing exam catalogue management.
//!
//! The form state machine ([`ExamEditor`]) is pure and lives entirely on the
//! client; only a validated draft ever reaches the store. Catalogue
//! operations are admin-only by convention: the router keeps students away
//! from the admin dashboard, but nothing here re-checks the caller's role,
//! mirroring the trust boundary of the storage collaborator's access rules.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

use crate::domain::exam::{canonical_fee_string, Exam, ExamDraft, ExamId};
use crate::domain::ports::{ExamRepository, ExamRepositoryError, Subscription};
use crate::domain::Error;

/// Date format used by the deadline form field.
const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors for the exam form, one per submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamFormError {
    MissingName,
    MissingCourseCode,
    MissingDescription,
    MissingFee,
    MissingDeadline,
    InvalidFee,
    NonPositiveFee,
    InvalidDeadline,
}

impl ExamFormError {
    /// The form field the error belongs to.
    pub fn field(self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingCourseCode => "courseCode",
            Self::MissingDescription => "description",
            Self::MissingFee | Self::InvalidFee | Self::NonPositiveFee => "fee",
            Self::MissingDeadline | Self::InvalidDeadline => "registrationDeadline",
        }
    }
}

impl fmt::Display for ExamFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "exam name is required"),
            Self::MissingCourseCode => write!(f, "course code is required"),
            Self::MissingDescription => write!(f, "description is required"),
            Self::MissingFee => write!(f, "fee is required"),
            Self::MissingDeadline => write!(f, "registration deadline is required"),
            Self::InvalidFee => write!(f, "fee must be a number"),
            Self::NonPositiveFee => write!(f, "fee must be a positive number"),
            Self::InvalidDeadline => write!(f, "registration deadline must be a valid date"),
        }
    }
}

impl std::error::Error for ExamFormError {}

/// Raw exam form fields, exactly as a UI would submit them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamForm {
    /// Exam title field.
    pub name: String,
    /// Course code field.
    pub course_code: String,
    /// Description field.
    pub description: String,
    /// Fee field, a decimal string.
    pub fee: String,
    /// Deadline field, `YYYY-MM-DD`.
    pub registration_deadline: String,
}

impl ExamForm {
    /// Validate the form into a draft, reporting the first failing field.
    pub fn validate(&self) -> Result<ExamDraft, ExamFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ExamFormError::MissingName);
        }
        let course_code = self.course_code.trim();
        if course_code.is_empty() {
            return Err(ExamFormError::MissingCourseCode);
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ExamFormError::MissingDescription);
        }
        let fee_input = self.fee.trim();
        if fee_input.is_empty() {
            return Err(ExamFormError::MissingFee);
        }
        let deadline_input = self.registration_deadline.trim();
        if deadline_input.is_empty() {
            return Err(ExamFormError::MissingDeadline);
        }

        let fee: f64 = fee_input.parse().map_err(|_| ExamFormError::InvalidFee)?;
        if !fee.is_finite() {
            return Err(ExamFormError::InvalidFee);
        }
        if fee <= 0.0 {
            return Err(ExamFormError::NonPositiveFee);
        }

        let registration_deadline = NaiveDate::parse_from_str(deadline_input, DEADLINE_FORMAT)
            .map_err(|_| ExamFormError::InvalidDeadline)?;

        Ok(ExamDraft {
            name: name.to_owned(),
            course_code: course_code.to_owned(),
            description: description.to_owned(),
            fee,
            registration_deadline,
        })
    }
}

/// Create/edit state for the admin exam form.
///
/// Starts in create mode with a pristine form. [`ExamEditor::begin_edit`]
/// loads an exam's fields and keys the editor to its id;
/// [`ExamEditor::cancel_edit`] returns to pristine create mode regardless of
/// prior field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamEditor {
    form: ExamForm,
    editing: Option<ExamId>,
}

impl ExamEditor {
    /// Start in create mode with an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current form fields.
    pub fn form(&self) -> &ExamForm {
        &self.form
    }

    /// Mutable access for the UI's field bindings.
    pub fn form_mut(&mut self) -> &mut ExamForm {
        &mut self.form
    }

    /// Id of the exam being edited, when in edit mode.
    pub fn editing(&self) -> Option<&ExamId> {
        self.editing.as_ref()
    }

    /// Whether the editor is in edit mode.
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Load an exam's fields into the form and enter edit mode.
    ///
    /// The deadline is normalised back to the `YYYY-MM-DD` input format and
    /// the fee to its canonical decimal string, so a save-then-edit round
    /// trip reproduces what the admin typed.
    pub fn begin_edit(&mut self, exam: &Exam) {
        self.form = ExamForm {
            name: exam.name.clone(),
            course_code: exam.course_code.clone(),
            description: exam.description.clone(),
            fee: canonical_fee_string(exam.fee),
            registration_deadline: exam
                .registration_deadline
                .format(DEADLINE_FORMAT)
                .to_string(),
        };
        self.editing = Some(exam.id.clone());
    }

    /// Discard all fields and return to create mode.
    pub fn cancel_edit(&mut self) {
        *self = Self::default();
    }
}

/// Interactive-confirmation token required by destructive operations.
///
/// The UI constructs it only after the admin has confirmed the dialog, which
/// turns "requires confirmation" into a compile-time precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// The admin confirmed the deletion.
    Confirmed,
}

/// Admin catalogue service over the exam store.
#[derive(Clone)]
pub struct ExamCatalogService<E> {
    exams: Arc<E>,
}

impl<E> ExamCatalogService<E> {
    /// Create a service over the exam store.
    pub fn new(exams: Arc<E>) -> Self {
        Self { exams }
    }
}

fn map_exam_error(error: ExamRepositoryError) -> Error {
    match error {
        ExamRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("exam store unavailable: {message}"))
        }
        ExamRepositoryError::Query { message } => {
            Error::internal(format!("exam store error: {message}"))
        }
        ExamRepositoryError::NotFound { exam_id } => {
            Error::not_found(format!("exam {exam_id} not found"))
        }
    }
}

impl<E> ExamCatalogService<E>
where
    E: ExamRepository,
{
    /// Subscribe to the full catalogue.
    pub async fn catalogue(&self) -> Result<Subscription<Vec<Exam>>, Error> {
        self.exams.watch_all().await.map_err(map_exam_error)
    }

    /// Validate the editor's form and persist it.
    ///
    /// In create mode this inserts a new exam with a fresh creation
    /// timestamp; in edit mode it updates the referenced exam, preserving
    /// `created_at` and refreshing `last_updated`. On validation failure no
    /// write is attempted and the editor keeps its state so the admin can
    /// correct the field. On success the editor resets to create mode.
    pub async fn save(&self, editor: &mut ExamEditor) -> Result<Exam, Error> {
        let draft = editor.form().validate().map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": err.field() }))
        })?;

        let exam = match editor.editing() {
            Some(exam_id) => self
                .exams
                .update(exam_id, draft)
                .await
                .map_err(map_exam_error)?,
            None => self.exams.insert(draft).await.map_err(map_exam_error)?,
        };

        info!(exam_id = %exam.id, course_code = %exam.course_code, "exam saved");
        editor.cancel_edit();
        Ok(exam)
    }

    /// Irreversibly delete an exam after interactive confirmation.
    ///
    /// Registrations referencing the exam are not cascaded; they become
    /// orphans that the student view drops and the admin ledger keeps.
    pub async fn delete(
        &self,
        exam_id: &ExamId,
        _confirmation: DeleteConfirmation,
    ) -> Result<(), Error> {
        self.exams.delete(exam_id).await.map_err(map_exam_error)?;
        info!(exam_id = %exam_id, "exam deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
