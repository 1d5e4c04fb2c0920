//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities of the portal (profiles,
//! exams, registrations), the pure view router, and the services that drive
//! the two external collaborators through the ports in [`ports`]. Types are
//! immutable where the domain says so; each type's Rustdoc documents its
//! invariants and serialisation contract.

pub mod auth;
pub mod catalog_service;
pub mod error;
pub mod exam;
pub mod ledger;
pub mod ports;
pub mod profile;
pub mod registration;
pub mod registration_service;
pub mod router;
pub mod session;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::catalog_service::{
    DeleteConfirmation, ExamCatalogService, ExamEditor, ExamForm, ExamFormError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exam::{canonical_fee_string, format_fee, Exam, ExamDraft, ExamId};
pub use self::ledger::{ledger, LedgerRow};
pub use self::profile::{
    Identity, IdentityUid, Profile, ProfileDraft, ProfileValidationError, Role, StudentId,
};
pub use self::registration::{
    PaymentStatus, Registration, RegistrationDraft, RegistrationId,
};
pub use self::registration_service::{
    my_registrations_view, PaymentPrompt, RegisteredExam, RegistrationService,
};
pub use self::router::{home_dashboard, route, Page, PageRequest};
pub use self::session::{SessionResolver, SessionState};
