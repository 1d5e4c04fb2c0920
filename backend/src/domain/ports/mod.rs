//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with its two external
//! collaborators: the hosted document store and the authentication provider.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod exam_repository;
mod profile_repository;
mod registration_repository;
mod subscription;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{AuthGateway, AuthGatewayError};
#[cfg(test)]
pub use exam_repository::MockExamRepository;
pub use exam_repository::{ExamRepository, ExamRepositoryError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{RegistrationRepository, RegistrationRepositoryError};
pub use subscription::{Subscription, SubscriptionClosed};
