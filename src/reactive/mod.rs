//! Reactive primitives for the signup form
//!
//! A small push-based toolkit, single-threaded by construction:
//!
//! - [`Scheduler`]: explicit event-dispatch context owning a clock and a timer queue.
//! - [`Observable`]: a shared value wrapper that notifies observers on every `set`.
//! - [`Stream`]: a cold push stream with the operators the validation pipeline needs
//!   (`map`, `remove_duplicates`, `debounce`, `flat_map`, `combine_latest`).
//! - [`Subscription`] / [`SubscriptionBag`]: cancellation handles.
//!
//! # Invariants
//!
//! 1. Everything is `Rc`-based and therefore `!Send`; all work happens on the thread
//!    that owns the [`Scheduler`].
//! 2. No internal `RefCell` borrow is held while a user callback runs, so callbacks
//!    may re-enter (set values, subscribe, cancel).
//! 3. Cancelling a [`Subscription`] is idempotent and also cancels any timer the
//!    pipeline had pending.

pub mod observable;
pub mod scheduler;
pub mod stream;
pub mod subscription;

pub use observable::{Observable, ObserverId};
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock, TimerId};
pub use stream::{Observer, Stream};
pub use subscription::{Subscription, SubscriptionBag};
