//! Cancellation handles

use std::fmt;

/// Keeps a stream pipeline alive; cancelling (or dropping) tears it down.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    on_cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `on_cancel` exactly once
    pub fn new(on_cancel: impl FnOnce() + 'static) -> Self {
        Self {
            on_cancel: Some(Box::new(on_cancel)),
        }
    }

    /// A subscription with nothing to cancel
    pub fn empty() -> Self {
        Self { on_cancel: None }
    }

    /// True once cancelled, or if there was never anything to cancel
    pub fn is_closed(&self) -> bool {
        self.on_cancel.is_none()
    }

    /// Cancel the pipeline. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(on_cancel) = self.on_cancel.take() {
            on_cancel();
        }
    }

    /// Move this subscription into `bag`
    pub fn store_in(self, bag: &mut SubscriptionBag) {
        bag.insert(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Owns a set of subscriptions and cancels them together
#[derive(Debug, Default)]
pub struct SubscriptionBag {
    items: Vec<Subscription>,
}

impl SubscriptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subscription: Subscription) {
        self.items.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cancel and forget every stored subscription. Safe on an empty bag.
    pub fn cancel_all(&mut self) {
        // Take the list first so a cancel callback never sees a half-drained bag.
        let items = std::mem::take(&mut self.items);
        for mut subscription in items {
            subscription.cancel();
        }
    }
}
