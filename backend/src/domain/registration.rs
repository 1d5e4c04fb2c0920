//! Registration aggregate binding a student to an exam.
//!
//! The student name is denormalised into the record at creation time so the
//! ledger never joins against profiles; a later profile rename does not
//! retroactively update past registrations. The exam reference is weak:
//! deleting an exam orphans its registrations rather than cascading.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::exam::ExamId;
use super::profile::StudentId;

/// Store-assigned identifier for a registration document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(String);

impl RegistrationId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-state payment lifecycle of a registration.
///
/// A registration is created `Pending` and transitions once, irreversibly,
/// to `Paid`. No other states exist and nothing moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Registered, awaiting (simulated) payment.
    Pending,
    /// Payment confirmed; terminal.
    Paid,
}

impl PaymentStatus {
    /// Upper-case label as rendered in dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
        }
    }
}

/// Registration fields submitted by the student workflow, before the store
/// assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    /// Student number of the registrant.
    pub student_id: StudentId,
    /// Display name denormalised at creation time.
    pub student_name: String,
    /// Exam being registered for (weak reference).
    pub exam_id: ExamId,
}

/// Stored registration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Store-assigned identifier.
    pub id: RegistrationId,
    /// Student number of the registrant.
    pub student_id: StudentId,
    /// Display name captured when the registration was created.
    pub student_name: String,
    /// Exam being registered for (weak reference).
    pub exam_id: ExamId,
    /// Payment lifecycle state.
    pub status: PaymentStatus,
    /// Server-assigned creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Server-assigned timestamp of the pending-to-paid transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_timestamp: Option<DateTime<Utc>>,
}

impl Registration {
    /// Whether this registration still awaits payment.
    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}
