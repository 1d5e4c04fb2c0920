//! In-memory adapters for the portal ports.
//!
//! [`MemoryDocumentStore`] stands in for the hosted document store and
//! [`MemoryAuthGateway`] for the hosted auth provider. Both keep the push
//! semantics the ports promise, so domain services and tests exercise the
//! same subscription flow the production adapters would.

mod auth;
mod store;

pub use self::auth::MemoryAuthGateway;
pub use self::store::MemoryDocumentStore;
