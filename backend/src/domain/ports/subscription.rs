//! Live subscription handle shared by every listener-based port.
//!
//! The remote store pushes whole-collection snapshots; a [`Subscription`]
//! caches the latest one and wakes waiters when a fresh snapshot lands.
//! Delivery is in commit order within one subscription, but nothing orders
//! two independently opened subscriptions against each other: code joining
//! across streams must tolerate a registration whose exam has not arrived
//! (or has already gone).
//!
//! Dropping the handle releases the listener; [`Subscription::unsubscribe`]
//! spells the release out on deliberate teardown paths.

use thiserror::Error;
use tokio::sync::watch;

/// The backing listener was torn down and no further updates will arrive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("subscription source closed")]
pub struct SubscriptionClosed;

/// Handle to a continuously updated value pushed by a remote collection.
#[derive(Debug)]
pub struct Subscription<T> {
    receiver: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    /// Wrap a watch receiver fed by an adapter's change listener.
    pub fn new(receiver: watch::Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Clone the most recently delivered snapshot.
    pub fn snapshot(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Wait until a snapshot newer than the last observed one arrives.
    pub async fn changed(&mut self) -> Result<(), SubscriptionClosed> {
        self.receiver
            .changed()
            .await
            .map_err(|_| SubscriptionClosed)
    }

    /// Wait for the next snapshot and return it.
    pub async fn next(&mut self) -> Result<T, SubscriptionClosed> {
        self.changed().await?;
        Ok(self.snapshot())
    }

    /// Release the listener. Equivalent to dropping the handle; exists so
    /// teardown paths can state their intent.
    pub fn unsubscribe(self) {
        drop(self);
    }
}
