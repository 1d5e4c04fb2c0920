//! View routing: a pure map from session state and requested page to the
//! page actually rendered.
//!
//! The router gates navigation only. It never authorises data operations;
//! those are the responsibility of the services and, ultimately, of the
//! storage collaborator's access rules.

use crate::domain::profile::Role;
use crate::domain::session::SessionState;

/// Page requested by the UI, before routing rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// The login / sign-up view.
    Auth,
    /// The profile setup view.
    RegisterProfile,
    /// The student dashboard.
    StudentDashboard,
    /// The admin dashboard.
    AdminDashboard,
    /// Anything the portal does not recognise.
    Unknown,
}

/// Page the portal will actually render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// The login / sign-up view.
    Auth,
    /// The profile setup view.
    RegisterProfile,
    /// The student dashboard.
    StudentDashboard,
    /// The admin dashboard.
    AdminDashboard,
    /// Fallback view with an explicit way back home.
    NotFound {
        /// The role's home dashboard, offered as the recovery action.
        home: Box<Page>,
    },
}

/// The dashboard a role lands on by default.
pub fn home_dashboard(role: &Role) -> Page {
    match role {
        Role::Student { .. } => Page::StudentDashboard,
        Role::Admin => Page::AdminDashboard,
    }
}

/// Map a session state and requested page to a renderable page.
///
/// Rules, in priority order: unauthenticated sessions always land on the
/// auth view; a signed-in identity without a profile always lands on profile
/// setup; a profiled identity gets the requested page when it belongs to the
/// role's permitted set, is redirected home when it asks for the auth or
/// setup views, and otherwise gets a not-found view carrying the way home.
pub fn route(session: &SessionState, requested: PageRequest) -> Page {
    let profile = match session {
        SessionState::SignedOut | SessionState::Unavailable { .. } => return Page::Auth,
        SessionState::ProfileSetup { .. } => return Page::RegisterProfile,
        SessionState::Active { profile } => profile,
    };

    let home = home_dashboard(&profile.role);
    match (&profile.role, requested) {
        (Role::Student { .. }, PageRequest::StudentDashboard)
        | (Role::Admin, PageRequest::AdminDashboard) => home,
        (_, PageRequest::Auth | PageRequest::RegisterProfile) => home,
        (
            Role::Student { .. } | Role::Admin,
            PageRequest::StudentDashboard | PageRequest::AdminDashboard | PageRequest::Unknown,
        ) => Page::NotFound {
            home: Box::new(home),
        },
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::profile::{Identity, IdentityUid, Profile, StudentId};
    use crate::domain::Error;
    use chrono::Utc;
    use rstest::rstest;

    fn profile(role: Role) -> Profile {
        Profile {
            uid: IdentityUid::new("uid-1").expect("uid"),
            email: None,
            name: "Jane Moraa".to_owned(),
            role,
            created_at: Utc::now(),
        }
    }

    fn student() -> Role {
        Role::Student {
            student_id: StudentId::new("KNP/001/2025").expect("student id"),
        }
    }

    #[rstest]
    #[case(PageRequest::Auth)]
    #[case(PageRequest::RegisterProfile)]
    #[case(PageRequest::StudentDashboard)]
    #[case(PageRequest::AdminDashboard)]
    #[case(PageRequest::Unknown)]
    fn signed_out_always_routes_to_auth(#[case] requested: PageRequest) {
        assert_eq!(route(&SessionState::SignedOut, requested), Page::Auth);
    }

    #[rstest]
    #[case(PageRequest::Auth)]
    #[case(PageRequest::Unknown)]
    fn unavailable_sessions_fall_back_to_auth(#[case] requested: PageRequest) {
        let session = SessionState::Unavailable {
            error: Error::service_unavailable("profile store unavailable"),
        };
        assert_eq!(route(&session, requested), Page::Auth);
    }

    #[rstest]
    #[case(PageRequest::Auth)]
    #[case(PageRequest::StudentDashboard)]
    fn missing_profile_routes_to_setup(#[case] requested: PageRequest) {
        let session = SessionState::ProfileSetup {
            identity: Identity {
                uid: IdentityUid::new("uid-1").expect("uid"),
                email: None,
                anonymous: false,
            },
        };
        assert_eq!(route(&session, requested), Page::RegisterProfile);
    }

    #[rstest]
    fn student_reaches_student_dashboard() {
        let session = SessionState::Active {
            profile: profile(student()),
        };
        assert_eq!(
            route(&session, PageRequest::StudentDashboard),
            Page::StudentDashboard
        );
    }

    #[rstest]
    #[case(PageRequest::Auth)]
    #[case(PageRequest::RegisterProfile)]
    fn profiled_sessions_redirect_auth_pages_home(#[case] requested: PageRequest) {
        let student_session = SessionState::Active {
            profile: profile(student()),
        };
        assert_eq!(route(&student_session, requested), Page::StudentDashboard);

        let admin_session = SessionState::Active {
            profile: profile(Role::Admin),
        };
        assert_eq!(route(&admin_session, requested), Page::AdminDashboard);
    }

    #[rstest]
    fn student_cannot_reach_admin_dashboard() {
        let session = SessionState::Active {
            profile: profile(student()),
        };
        assert_eq!(
            route(&session, PageRequest::AdminDashboard),
            Page::NotFound {
                home: Box::new(Page::StudentDashboard)
            }
        );
    }

    #[rstest]
    fn admin_cannot_reach_student_dashboard() {
        let session = SessionState::Active {
            profile: profile(Role::Admin),
        };
        assert_eq!(
            route(&session, PageRequest::StudentDashboard),
            Page::NotFound {
                home: Box::new(Page::AdminDashboard)
            }
        );
    }

    #[rstest]
    fn unknown_pages_fall_back_with_a_way_home() {
        let session = SessionState::Active {
            profile: profile(Role::Admin),
        };
        assert_eq!(
            route(&session, PageRequest::Unknown),
            Page::NotFound {
                home: Box::new(Page::AdminDashboard)
            }
        );
    }
}
