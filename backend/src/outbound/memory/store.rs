//! In-process document store adapter.
//!
//! Reproduces the hosted store's contract: collection paths namespaced by a
//! deployment identifier, server-assigned identifiers and timestamps, a
//! transactional check-and-insert for registrations, and push-based
//! whole-collection snapshots delivered through watch channels.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::domain::exam::{Exam, ExamDraft, ExamId};
use crate::domain::ports::{
    ExamRepository, ExamRepositoryError, ProfileRepository, ProfileRepositoryError,
    RegistrationRepository, RegistrationRepositoryError, Subscription,
};
use crate::domain::profile::{IdentityUid, Profile, ProfileDraft, StudentId};
use crate::domain::registration::{
    PaymentStatus, Registration, RegistrationDraft, RegistrationId,
};

/// In-memory document store namespaced by a deployment identifier.
pub struct MemoryDocumentStore {
    deployment_id: String,
    clock: Arc<dyn Clock>,
    profiles: Mutex<HashMap<String, Profile>>,
    exams: watch::Sender<Vec<Exam>>,
    registrations: watch::Sender<Vec<Registration>>,
}

impl MemoryDocumentStore {
    /// Create an empty store for the given deployment namespace.
    pub fn new(deployment_id: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let (exams, _) = watch::channel(Vec::new());
        let (registrations, _) = watch::channel(Vec::new());
        Self {
            deployment_id: deployment_id.into(),
            clock,
            profiles: Mutex::new(HashMap::new()),
            exams,
            registrations,
        }
    }

    fn profile_path(&self, uid: &IdentityUid) -> String {
        format!(
            "artifacts/{}/users/{uid}/profiles/{uid}",
            self.deployment_id
        )
    }

    fn public_path(&self, collection: &str) -> String {
        format!("artifacts/{}/public/data/{collection}", self.deployment_id)
    }

    fn lock_profiles(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, Profile>>, ProfileRepositoryError> {
        self.profiles
            .lock()
            .map_err(|_| ProfileRepositoryError::query("profile collection mutex poisoned"))
    }
}

#[async_trait]
impl ProfileRepository for MemoryDocumentStore {
    async fn find_by_uid(
        &self,
        uid: &IdentityUid,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        debug!(path = %self.profile_path(uid), "profile lookup");
        Ok(self.lock_profiles()?.get(uid.as_str()).cloned())
    }

    async fn create(&self, draft: ProfileDraft) -> Result<Profile, ProfileRepositoryError> {
        let mut profiles = self.lock_profiles()?;
        if profiles.contains_key(draft.uid.as_str()) {
            return Err(ProfileRepositoryError::already_exists(draft.uid.as_str()));
        }

        let profile = Profile {
            uid: draft.uid,
            email: draft.email,
            name: draft.name,
            role: draft.role,
            created_at: self.clock.utc(),
        };
        debug!(path = %self.profile_path(&profile.uid), "profile created");
        profiles.insert(profile.uid.as_str().to_owned(), profile.clone());
        Ok(profile)
    }
}

#[async_trait]
impl ExamRepository for MemoryDocumentStore {
    async fn insert(&self, draft: ExamDraft) -> Result<Exam, ExamRepositoryError> {
        let now = self.clock.utc();
        let exam = Exam {
            id: ExamId::new(Uuid::new_v4().to_string()),
            name: draft.name,
            course_code: draft.course_code,
            description: draft.description,
            fee: draft.fee,
            registration_deadline: draft.registration_deadline,
            created_at: now,
            last_updated: now,
        };
        debug!(path = %self.public_path("exams"), exam_id = %exam.id, "exam inserted");

        let inserted = exam.clone();
        self.exams.send_modify(move |exams| exams.push(inserted));
        Ok(exam)
    }

    async fn update(
        &self,
        exam_id: &ExamId,
        draft: ExamDraft,
    ) -> Result<Exam, ExamRepositoryError> {
        let now = self.clock.utc();
        let mut result = Err(ExamRepositoryError::not_found(exam_id.as_str()));
        self.exams.send_if_modified(|exams| {
            let Some(existing) = exams.iter_mut().find(|exam| exam.id == *exam_id) else {
                return false;
            };
            existing.name = draft.name;
            existing.course_code = draft.course_code;
            existing.description = draft.description;
            existing.fee = draft.fee;
            existing.registration_deadline = draft.registration_deadline;
            existing.last_updated = now;
            result = Ok(existing.clone());
            true
        });
        debug!(path = %self.public_path("exams"), exam_id = %exam_id, "exam updated");
        result
    }

    async fn delete(&self, exam_id: &ExamId) -> Result<(), ExamRepositoryError> {
        let mut removed = false;
        self.exams.send_if_modified(|exams| {
            let before = exams.len();
            exams.retain(|exam| exam.id != *exam_id);
            removed = exams.len() != before;
            removed
        });
        if removed {
            debug!(path = %self.public_path("exams"), exam_id = %exam_id, "exam deleted");
            Ok(())
        } else {
            Err(ExamRepositoryError::not_found(exam_id.as_str()))
        }
    }

    async fn watch_all(&self) -> Result<Subscription<Vec<Exam>>, ExamRepositoryError> {
        Ok(Subscription::new(self.exams.subscribe()))
    }
}

#[async_trait]
impl RegistrationRepository for MemoryDocumentStore {
    async fn insert_unique(
        &self,
        draft: RegistrationDraft,
    ) -> Result<Registration, RegistrationRepositoryError> {
        let now = self.clock.utc();
        let mut result = Err(RegistrationRepositoryError::duplicate(
            draft.student_id.as_str(),
            draft.exam_id.as_str(),
        ));
        // Check and insert under the same channel lock: concurrent inserts
        // for the same (student, exam) pair resolve to exactly one winner.
        self.registrations.send_if_modified(|registrations| {
            let duplicate = registrations.iter().any(|reg| {
                reg.student_id == draft.student_id && reg.exam_id == draft.exam_id
            });
            if duplicate {
                return false;
            }

            let registration = Registration {
                id: RegistrationId::new(Uuid::new_v4().to_string()),
                student_id: draft.student_id.clone(),
                student_name: draft.student_name.clone(),
                exam_id: draft.exam_id.clone(),
                status: PaymentStatus::Pending,
                timestamp: now,
                payment_timestamp: None,
            };
            registrations.push(registration.clone());
            result = Ok(registration);
            true
        });
        if result.is_ok() {
            debug!(path = %self.public_path("registrations"), "registration inserted");
        }
        result
    }

    async fn mark_paid(
        &self,
        registration_id: &RegistrationId,
    ) -> Result<Registration, RegistrationRepositoryError> {
        let now = self.clock.utc();
        let mut result = Err(RegistrationRepositoryError::not_found(
            registration_id.as_str(),
        ));
        self.registrations.send_if_modified(|registrations| {
            let Some(existing) = registrations
                .iter_mut()
                .find(|reg| reg.id == *registration_id)
            else {
                return false;
            };
            if existing.status == PaymentStatus::Paid {
                result = Err(RegistrationRepositoryError::already_paid(
                    registration_id.as_str(),
                ));
                return false;
            }
            existing.status = PaymentStatus::Paid;
            existing.payment_timestamp = Some(now);
            result = Ok(existing.clone());
            true
        });
        if result.is_ok() {
            debug!(
                path = %self.public_path("registrations"),
                registration_id = %registration_id,
                "registration marked paid"
            );
        }
        result
    }

    async fn watch_all(
        &self,
    ) -> Result<Subscription<Vec<Registration>>, RegistrationRepositoryError> {
        Ok(Subscription::new(self.registrations.subscribe()))
    }

    async fn watch_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Subscription<Vec<Registration>>, RegistrationRepositoryError> {
        let mut source = self.registrations.subscribe();
        let student_id = student_id.clone();
        let initial: Vec<Registration> = source
            .borrow()
            .iter()
            .filter(|reg| reg.student_id == student_id)
            .cloned()
            .collect();

        let (tx, rx) = watch::channel(initial);
        tokio::spawn(async move {
            while source.changed().await.is_ok() {
                let filtered: Vec<Registration> = source
                    .borrow_and_update()
                    .iter()
                    .filter(|reg| reg.student_id == student_id)
                    .cloned()
                    .collect();
                if tx.send(filtered).is_err() {
                    // Subscriber released its handle; stop forwarding.
                    break;
                }
            }
        });
        Ok(Subscription::new(rx))
    }
}
