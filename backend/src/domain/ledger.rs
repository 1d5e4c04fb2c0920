//! Administrative registration ledger.
//!
//! A read-only join of every registration against the exam catalogue. The
//! two inputs come from independently opened subscriptions, so a row's exam
//! may be momentarily unresolved, or permanently so after an admin
//! deletion. Unlike the student view, the ledger keeps such rows: an
//! orphaned registration is still money owed or paid.

use crate::domain::exam::Exam;
use crate::domain::registration::Registration;

/// One ledger row: a registration and its exam, when still resolvable.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    /// The registration record.
    pub registration: Registration,
    /// The referenced exam, or `None` once it has been deleted.
    pub exam: Option<Exam>,
}

impl LedgerRow {
    /// Exam name for display, when resolved.
    pub fn exam_name(&self) -> Option<&str> {
        self.exam.as_ref().map(|exam| exam.name.as_str())
    }

    /// Course code for display, when resolved.
    pub fn course_code(&self) -> Option<&str> {
        self.exam.as_ref().map(|exam| exam.course_code.as_str())
    }
}

/// Join all registrations against the cached catalogue.
///
/// Every registration appears exactly once, in the order the store delivered
/// them; no row is dropped for referencing a deleted exam.
pub fn ledger(registrations: &[Registration], exams: &[Exam]) -> Vec<LedgerRow> {
    registrations
        .iter()
        .map(|registration| LedgerRow {
            registration: registration.clone(),
            exam: exams
                .iter()
                .find(|exam| exam.id == registration.exam_id)
                .cloned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::exam::ExamId;
    use crate::domain::profile::StudentId;
    use crate::domain::registration::{PaymentStatus, RegistrationId};
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    fn exam(id: &str) -> Exam {
        Exam {
            id: ExamId::new(id),
            name: "Intro to Systems".to_owned(),
            course_code: "CS101".to_owned(),
            description: "Foundations".to_owned(),
            fee: 1500.0,
            registration_deadline: NaiveDate::from_ymd_opt(2025, 12, 1).expect("date"),
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    fn registration(id: &str, exam_id: &str) -> Registration {
        Registration {
            id: RegistrationId::new(id),
            student_id: StudentId::new("KNP/001/2025").expect("student id"),
            student_name: "Jane Moraa".to_owned(),
            exam_id: ExamId::new(exam_id),
            status: PaymentStatus::Pending,
            timestamp: Utc::now(),
            payment_timestamp: None,
        }
    }

    #[rstest]
    fn joins_resolvable_rows_and_keeps_orphans() {
        let rows = ledger(
            &[
                registration("reg-1", "exam-1"),
                registration("reg-2", "exam-gone"),
            ],
            &[exam("exam-1")],
        );

        assert_eq!(rows.len(), 2);
        let first = rows.first().expect("first row");
        assert_eq!(first.exam_name(), Some("Intro to Systems"));
        assert_eq!(first.course_code(), Some("CS101"));
        let orphan = rows.get(1).expect("orphan row");
        assert!(orphan.exam.is_none());
        assert_eq!(orphan.registration.student_name, "Jane Moraa");
    }

    #[rstest]
    fn empty_inputs_yield_empty_ledger() {
        assert!(ledger(&[], &[]).is_empty());
        assert!(ledger(&[], &[exam("exam-1")]).is_empty());
    }
}
