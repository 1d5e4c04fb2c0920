//! Student-facing registration workflow.
//!
//! Listing is push-based: the service hands out subscriptions and the UI
//! keeps the latest snapshots as its cache. Mutations take the caller's
//! cached snapshot as an argument, because the duplicate pre-check is
//! defined against *the client's knowledge of state*; the storage port's
//! transactional check-and-insert is what actually guarantees uniqueness
//! across concurrent sessions.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::exam::{Exam, ExamId};
use crate::domain::ports::{
    ExamRepository, ExamRepositoryError, RegistrationRepository, RegistrationRepositoryError,
    Subscription,
};
use crate::domain::profile::{Profile, StudentId};
use crate::domain::registration::{Registration, RegistrationDraft};
use crate::domain::Error;

/// Confirmation step opened right after a successful registration.
///
/// Carries what the payment dialog shows: which exam, and the fee as
/// rendered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPrompt {
    /// The freshly created `pending` registration.
    pub registration: Registration,
    /// Exam name, for the dialog headline.
    pub exam_name: String,
    /// Fee rendered for display, e.g. `KES 1,500`.
    pub display_fee: String,
}

/// A registration joined to its exam for the student's own list.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredExam {
    /// The student's registration record.
    pub registration: Registration,
    /// The resolved exam it refers to.
    pub exam: Exam,
}

/// Join registrations against the cached catalogue for display.
///
/// Rows whose exam cannot be resolved (deleted by an admin after the
/// registration was made) are silently dropped, not flagged as orphaned.
/// The admin ledger takes the opposite choice; see the ledger module.
pub fn my_registrations_view(
    registrations: &[Registration],
    exams: &[Exam],
) -> Vec<RegisteredExam> {
    registrations
        .iter()
        .filter_map(|registration| {
            exams
                .iter()
                .find(|exam| exam.id == registration.exam_id)
                .map(|exam| RegisteredExam {
                    registration: registration.clone(),
                    exam: exam.clone(),
                })
        })
        .collect()
}

/// Student workflow service over the exam and registration stores.
#[derive(Clone)]
pub struct RegistrationService<E, R> {
    exams: Arc<E>,
    registrations: Arc<R>,
}

impl<E, R> RegistrationService<E, R> {
    /// Create a service over the two stores.
    pub fn new(exams: Arc<E>, registrations: Arc<R>) -> Self {
        Self {
            exams,
            registrations,
        }
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

fn map_registration_error(error: RegistrationRepositoryError) -> Error {
    match error {
        RegistrationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("registration store unavailable: {message}"))
        }
        RegistrationRepositoryError::Query { message } => {
            Error::internal(format!("registration store error: {message}"))
        }
        RegistrationRepositoryError::Duplicate {
            student_id,
            exam_id,
        } => Error::conflict("already registered for this exam").with_details(json!({
            "studentId": student_id,
            "examId": exam_id,
        })),
        RegistrationRepositoryError::NotFound { registration_id } => {
            Error::not_found(format!("registration {registration_id} not found"))
        }
        RegistrationRepositoryError::AlreadyPaid { registration_id } => {
            Error::conflict(format!("registration {registration_id} is already paid"))
        }
    }
}

impl<E, R> RegistrationService<E, R>
where
    E: ExamRepository,
    R: RegistrationRepository,
{
    /// Subscribe to the full exam catalogue.
    ///
    /// Expired exams remain listed; filtering by deadline is a presentation
    /// decision left to the UI.
    pub async fn exams(&self) -> Result<Subscription<Vec<Exam>>, Error> {
        self.exams.watch_all().await.map_err(map_exam_error)
    }

    /// Subscribe to the caller's own registrations, filtered store-side.
    pub async fn my_registrations(
        &self,
        student_id: &StudentId,
    ) -> Result<Subscription<Vec<Registration>>, Error> {
        self.registrations
            .watch_for_student(student_id)
            .await
            .map_err(map_registration_error)
    }

    /// Register the student for an exam and open the payment step.
    ///
    /// Rejects without writing when `cached` (the caller's current
    /// registration snapshot) already holds a registration for this exam.
    /// A concurrent session that slipped past the cache check is caught by
    /// the store's uniqueness guarantee and surfaces as the same conflict.
    pub async fn register(
        &self,
        profile: &Profile,
        exam: &Exam,
        cached: &[Registration],
    ) -> Result<PaymentPrompt, Error> {
        let Some(student_id) = profile.role.student_id() else {
            return Err(Error::forbidden("only student profiles can register for exams"));
        };

        let already_registered = cached
            .iter()
            .any(|reg| reg.exam_id == exam.id && reg.student_id == *student_id);
        if already_registered {
            return Err(
                Error::conflict("already registered for this exam").with_details(json!({
                    "studentId": student_id.as_str(),
                    "examId": exam.id.as_str(),
                })),
            );
        }

        let registration = self
            .registrations
            .insert_unique(RegistrationDraft {
                student_id: student_id.clone(),
                student_name: profile.name.clone(),
                exam_id: exam.id.clone(),
            })
            .await
            .map_err(map_registration_error)?;

        info!(
            student_id = %registration.student_id,
            exam_id = %registration.exam_id,
            "registration created"
        );

        Ok(PaymentPrompt {
            registration,
            exam_name: exam.name.clone(),
            display_fee: exam.display_fee(),
        })
    }

    /// Confirm the simulated payment for the caller's pending registration.
    ///
    /// No monetary transfer occurs; the record transitions once to `paid`
    /// with a server-assigned payment timestamp.
    pub async fn confirm_payment(
        &self,
        student_id: &StudentId,
        exam_id: &ExamId,
        cached: &[Registration],
    ) -> Result<Registration, Error> {
        let registration = cached
            .iter()
            .find(|reg| reg.exam_id == *exam_id && reg.student_id == *student_id)
            .ok_or_else(|| Error::not_found("no registration found for this exam"))?;

        if !registration.is_pending() {
            return Err(Error::conflict("registration is already paid"));
        }

        let paid = self
            .registrations
            .mark_paid(&registration.id)
            .await
            .map_err(map_registration_error)?;

        info!(
            registration_id = %paid.id,
            exam_id = %paid.exam_id,
            "payment confirmed"
        );
        Ok(paid)
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
