//! Profile aggregate: the application-level user record.
//!
//! A profile is distinct from the authentication identity: the auth provider
//! vouches for *who* is signed in, the profile records what the portal knows
//! about them (display name, role, student number). Exactly one profile
//! exists per identity and its role never changes after creation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by profile constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyUid,
    EmptyName,
    EmptyStudentId,
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUid => write!(f, "identity uid must not be empty"),
            Self::EmptyName => write!(f, "display name must not be empty"),
            Self::EmptyStudentId => write!(f, "student id must not be empty"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Durable identifier issued by the auth provider for one identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityUid(String);

impl IdentityUid {
    /// Validate and construct an [`IdentityUid`].
    pub fn new(uid: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let uid = uid.into();
        if uid.trim().is_empty() {
            return Err(ProfileValidationError::EmptyUid);
        }
        Ok(Self(uid))
    }

    /// Generate a fresh random uid, as the auth provider would.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the underlying uid as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IdentityUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for IdentityUid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Authenticated identity snapshot emitted by the auth gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Durable identifier for this identity.
    pub uid: IdentityUid,
    /// Email address, absent for anonymous sessions.
    pub email: Option<String>,
    /// Whether the identity came from anonymous sign-in.
    pub anonymous: bool,
}

/// Institution-issued student number.
///
/// Registrations reference students by this value rather than by the durable
/// identity key, so it must never change once registrations exist against it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Validate and construct a [`StudentId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ProfileValidationError::EmptyStudentId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the underlying id as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of portal roles.
///
/// The student number lives inside the variant, so an admin profile cannot
/// carry one and a student profile cannot lack one. Adding a role forces
/// every match in the crate (the view router in particular) to be revisited
/// at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum Role {
    /// A student who registers and pays for exams.
    #[serde(rename = "student")]
    Student {
        /// Institution-issued student number.
        #[serde(rename = "studentId")]
        student_id: StudentId,
    },
    /// An administrator who maintains the exam catalogue.
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Student number carried by student roles.
    pub fn student_id(&self) -> Option<&StudentId> {
        match self {
            Self::Student { student_id } => Some(student_id),
            Self::Admin => None,
        }
    }

    /// Human-readable role label, as shown in the portal header.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Student { .. } => "Student",
            Self::Admin => "Administrator",
        }
    }
}

/// Profile fields chosen during setup, before the store assigns a creation
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    /// Identity this profile belongs to.
    pub uid: IdentityUid,
    /// Email copied from the identity, when present.
    pub email: Option<String>,
    /// Display name chosen at setup.
    pub name: String,
    /// Role chosen at setup; defaults to student in the setup flow.
    pub role: Role,
}

impl ProfileDraft {
    /// Validate setup input and build a draft for the given identity.
    pub fn try_new(
        identity: &Identity,
        name: &str,
        role: Role,
    ) -> Result<Self, ProfileValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileValidationError::EmptyName);
        }
        Ok(Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            name: name.to_owned(),
            role,
        })
    }
}

/// Stored profile document, one per authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Identity this profile belongs to.
    pub uid: IdentityUid,
    /// Email recorded at profile creation, when the identity had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name shown across the portal.
    pub name: String,
    /// Immutable role, tagged with the student number where applicable.
    #[serde(flatten)]
    pub role: Role,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    fn identity() -> Identity {
        Identity {
            uid: IdentityUid::new("uid-1").expect("uid"),
            email: Some("jane@kisii.ac.ke".to_owned()),
            anonymous: false,
        }
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn draft_rejects_blank_names(#[case] name: &str) {
        let err = ProfileDraft::try_new(&identity(), name, Role::Admin)
            .expect_err("blank name must fail");
        assert_eq!(err, ProfileValidationError::EmptyName);
    }

    #[rstest]
    fn draft_trims_display_name() {
        let draft = ProfileDraft::try_new(&identity(), "  Jane Moraa  ", Role::Admin)
            .expect("valid draft");
        assert_eq!(draft.name, "Jane Moraa");
        assert_eq!(draft.email.as_deref(), Some("jane@kisii.ac.ke"));
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn student_id_rejects_blank(#[case] raw: &str) {
        let err = StudentId::new(raw).expect_err("blank id must fail");
        assert_eq!(err, ProfileValidationError::EmptyStudentId);
    }

    #[rstest]
    fn profile_serialises_role_tag_and_student_id() {
        let profile = Profile {
            uid: IdentityUid::new("uid-1").expect("uid"),
            email: None,
            name: "Jane Moraa".to_owned(),
            role: Role::Student {
                student_id: StudentId::new("KNP/001/2025").expect("student id"),
            },
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&profile).expect("serialise");
        assert_eq!(value["role"], "student");
        assert_eq!(value["studentId"], "KNP/001/2025");

        let back: Profile = serde_json::from_value(value).expect("deserialise");
        assert_eq!(back, profile);
    }

    #[rstest]
    fn admin_role_omits_student_id() {
        let value = serde_json::to_value(Role::Admin).expect("serialise");
        assert_eq!(value["role"], "admin");
        assert!(value.get("studentId").is_none());
    }
}
