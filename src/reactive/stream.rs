//! Cold push streams
//!
//! A [`Stream`] is a recipe: every `subscribe` call builds a fresh pipeline with
//! its own operator state (dedup cache, debounce timer, combine buffers). Two
//! subscribers to the same stream therefore never share state.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::scheduler::{Scheduler, TimerId};
use super::subscription::Subscription;

/// Callback receiving each emitted value
pub type Observer<T> = Rc<dyn Fn(&T)>;

type SubscribeFn<T> = Rc<dyn Fn(Observer<T>) -> Subscription>;

pub struct Stream<T> {
    subscribe_fn: SubscribeFn<T>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            subscribe_fn: Rc::clone(&self.subscribe_fn),
        }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

impl<T: 'static> Stream<T> {
    /// Build a stream from its subscribe function
    pub fn from_fn(subscribe: impl Fn(Observer<T>) -> Subscription + 'static) -> Self {
        Self {
            subscribe_fn: Rc::new(subscribe),
        }
    }

    /// Start a pipeline delivering values to `observer`
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        (self.subscribe_fn)(Rc::new(observer))
    }

    pub fn map<U: 'static>(&self, transform: impl Fn(&T) -> U + 'static) -> Stream<U> {
        let upstream = self.clone();
        let transform = Rc::new(transform);
        Stream::from_fn(move |observer: Observer<U>| {
            let transform = Rc::clone(&transform);
            upstream.subscribe(move |value| observer(&transform(value)))
        })
    }

    /// Subscribe to the stream produced for each value and forward its output.
    ///
    /// Inner pipelines stay alive until they close on their own or the outer
    /// subscription is cancelled.
    pub fn flat_map<U: 'static>(&self, project: impl Fn(&T) -> Stream<U> + 'static) -> Stream<U> {
        let upstream = self.clone();
        let project = Rc::new(project);
        Stream::from_fn(move |observer: Observer<U>| {
            let inner_subs: Rc<RefCell<Vec<Subscription>>> = Rc::default();

            let outer = {
                let project = Rc::clone(&project);
                let inner_subs = Rc::clone(&inner_subs);
                upstream.subscribe(move |value| {
                    let observer = Rc::clone(&observer);
                    let inner = project(value).subscribe(move |out| observer(out));
                    if !inner.is_closed() {
                        let mut subs = inner_subs.borrow_mut();
                        subs.retain(|sub| !sub.is_closed());
                        subs.push(inner);
                    }
                })
            };

            Subscription::new(move || {
                drop(outer);
                let drained: Vec<Subscription> = inner_subs.borrow_mut().drain(..).collect();
                drop(drained);
            })
        })
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Emit `value` once, synchronously, on every subscription
    pub fn just(value: T) -> Self {
        Stream::from_fn(move |observer: Observer<T>| {
            observer(&value);
            Subscription::empty()
        })
    }

    /// Drop values equal to the previous one seen by this pipeline
    pub fn remove_duplicates(&self) -> Self
    where
        T: PartialEq,
    {
        let upstream = self.clone();
        Stream::from_fn(move |observer: Observer<T>| {
            let last: RefCell<Option<T>> = RefCell::new(None);
            upstream.subscribe(move |value: &T| {
                let is_new = last.borrow().as_ref() != Some(value);
                if is_new {
                    *last.borrow_mut() = Some(value.clone());
                    observer(value);
                }
            })
        })
    }

    /// Emit the latest value once `interval` passes with no newer one
    pub fn debounce(&self, interval: Duration, scheduler: &Scheduler) -> Self {
        let upstream = self.clone();
        let scheduler = scheduler.clone();
        Stream::from_fn(move |observer: Observer<T>| {
            let pending: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

            let upstream_sub = {
                let pending = Rc::clone(&pending);
                let scheduler = scheduler.clone();
                upstream.subscribe(move |value: &T| {
                    if let Some(id) = pending.take() {
                        scheduler.cancel(id);
                    }
                    let value = value.clone();
                    let observer = Rc::clone(&observer);
                    let fired = Rc::clone(&pending);
                    let id = scheduler.schedule_after(interval, move || {
                        fired.set(None);
                        observer(&value);
                    });
                    pending.set(Some(id));
                })
            };

            let scheduler = scheduler.clone();
            Subscription::new(move || {
                drop(upstream_sub);
                if let Some(id) = pending.take() {
                    scheduler.cancel(id);
                }
            })
        })
    }

    /// Pair the latest value of each side, emitting whenever either side updates
    /// once both have produced at least one value.
    pub fn combine_latest<U: Clone + 'static>(&self, other: &Stream<U>) -> Stream<(T, U)> {
        let left = self.clone();
        let right = other.clone();
        Stream::from_fn(move |observer: Observer<(T, U)>| {
            let latest: Rc<RefCell<(Option<T>, Option<U>)>> = Rc::new(RefCell::new((None, None)));

            let left_sub = {
                let latest = Rc::clone(&latest);
                let observer = Rc::clone(&observer);
                left.subscribe(move |value: &T| {
                    latest.borrow_mut().0 = Some(value.clone());
                    emit_pair(&latest, &observer);
                })
            };
            let right_sub = {
                let latest = Rc::clone(&latest);
                let observer = Rc::clone(&observer);
                right.subscribe(move |value: &U| {
                    latest.borrow_mut().1 = Some(value.clone());
                    emit_pair(&latest, &observer);
                })
            };

            Subscription::new(move || {
                drop(left_sub);
                drop(right_sub);
            })
        })
    }
}

fn emit_pair<T: Clone, U: Clone>(
    latest: &RefCell<(Option<T>, Option<U>)>,
    observer: &Observer<(T, U)>,
) {
    let pair = match &*latest.borrow() {
        (Some(left), Some(right)) => Some((left.clone(), right.clone())),
        _ => None,
    };
    if let Some(pair) = pair {
        observer(&pair);
    }
}
