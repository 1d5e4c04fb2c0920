//! Exam catalogue entries.
//!
//! An exam is an offering open for registration. The shared catalogue has no
//! ownership: every admin maintains it, every student sees all of it.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for an exam document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamId(String);

impl ExamId {
    /// Wrap a store-assigned identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated exam fields, before the store assigns an id and timestamps.
///
/// ## Invariants
/// - `fee` is finite and strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamDraft {
    /// Exam title, e.g. "Intro to Systems".
    pub name: String,
    /// Course code, e.g. "CS101".
    pub course_code: String,
    /// Free-text description.
    pub description: String,
    /// Registration fee in KES.
    pub fee: f64,
    /// Last calendar day on which students may register.
    pub registration_deadline: NaiveDate,
}

/// Stored exam document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    /// Store-assigned identifier.
    pub id: ExamId,
    /// Exam title.
    pub name: String,
    /// Course code.
    pub course_code: String,
    /// Free-text description.
    pub description: String,
    /// Registration fee in KES; finite and strictly positive.
    pub fee: f64,
    /// Last calendar day on which students may register.
    pub registration_deadline: NaiveDate,
    /// Server-assigned creation timestamp, preserved across edits.
    pub created_at: DateTime<Utc>,
    /// Server-assigned timestamp of the most recent write.
    pub last_updated: DateTime<Utc>,
}

impl Exam {
    /// Fee rendered for display, e.g. `KES 1,500`.
    pub fn display_fee(&self) -> String {
        format!("KES {}", format_fee(self.fee))
    }
}

/// Format a fee with thousands separators, keeping any fractional part.
///
/// Mirrors locale-style number rendering: `1500.0` becomes `1,500` and
/// `1500.5` becomes `1,500.5`.
pub fn format_fee(fee: f64) -> String {
    let canonical = canonical_fee_string(fee);
    let (integer, fraction) = match canonical.split_once('.') {
        Some((i, f)) => (i.to_owned(), Some(f.to_owned())),
        None => (canonical, None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = integer.chars().collect();
    for (offset, digit) in digits.iter().enumerate() {
        let remaining = digits.len() - offset;
        if offset > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    match fraction {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// Canonical decimal string for a fee, as used to refill the admin form.
///
/// Whole-number fees drop the fractional part entirely, matching what an
/// admin originally typed for the common case.
pub fn canonical_fee_string(fee: f64) -> String {
    fee.to_string()
}
