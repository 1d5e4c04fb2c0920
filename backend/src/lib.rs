//! Application core for a single-institution exam registration portal.
//!
//! Students browse a shared exam catalogue, register, and walk a simulated
//! payment flow; administrators maintain the catalogue and oversee every
//! registration. Durable storage, authentication, and change notification are
//! delegated to two external collaborators (a hosted document store and an
//! auth provider) reached exclusively through the driven ports in
//! [`domain::ports`]. This crate therefore ships no HTTP surface or binary:
//! it *is* the client of those collaborators, and a UI drives it through the
//! services in [`domain`].
//!
//! The [`outbound`] module provides in-process adapters with the same
//! namespacing, server-assigned-timestamp, and push-notification semantics as
//! the hosted backend, so the whole portal can be exercised in tests.

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::PortalSettings;
