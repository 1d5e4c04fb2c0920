//! Driven adapters implementing the domain ports.
//!
//! The production collaborators are hosted services outside this repository;
//! the [`memory`] adapters reproduce their contract in-process so the portal
//! can run end to end in tests.

pub mod memory;
