//! Observable value wrapper
//!
//! `Observable<T>` is a shared cell that pushes every new value to its observers.
//! Unlike a memoizing signal, `set` always notifies, even when the value is
//! unchanged; downstream `remove_duplicates` is where repeats get filtered.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::stream::{Observer, Stream};
use super::subscription::Subscription;

/// Identifies one registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Inner<T> {
    value: RefCell<T>,
    observers: RefCell<Vec<(ObserverId, Observer<T>)>>,
    next_id: Cell<u64>,
}

/// Shared, change-notifying value. Clones share the same value and observers.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("observers", &self.inner.observers.borrow().len())
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Store `value` and notify every observer with it
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.notify();
    }

    /// Mutate in place, then notify
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        mutate(&mut self.inner.value.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        let value = self.get();
        let observers: Vec<(ObserverId, Observer<T>)> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect();

        for (id, observer) in observers {
            // An earlier observer may have unsubscribed this one.
            if self.is_subscribed(id) {
                observer(&value);
            }
        }
    }

    /// Register a change callback. It is not called with the current value.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> ObserverId {
        self.register(Rc::new(observer))
    }

    fn register(&self, observer: Observer<T>) -> ObserverId {
        let id = ObserverId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.observers.borrow_mut().push((id, observer));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.inner.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(registered, _)| *registered != id);
        observers.len() != before
    }

    fn is_subscribed(&self, id: ObserverId) -> bool {
        self.inner
            .observers
            .borrow()
            .iter()
            .any(|(registered, _)| *registered == id)
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Stream of values: the current one on subscription, then every `set`.
    ///
    /// The stream holds the observable weakly; subscribing after every handle
    /// has been dropped yields nothing.
    pub fn stream(&self) -> Stream<T> {
        let source: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Stream::from_fn(move |observer: Observer<T>| {
            let Some(inner) = source.upgrade() else {
                return Subscription::empty();
            };
            let observable = Observable { inner };
            let id = observable.register(Rc::clone(&observer));
            observer(&observable.get());

            let source = Rc::downgrade(&observable.inner);
            Subscription::new(move || {
                if let Some(inner) = source.upgrade() {
                    Observable { inner }.unsubscribe(id);
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone + 'static>(observable: &Observable<T>) -> (Rc<RefCell<Vec<T>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = observable
            .stream()
            .subscribe(move |value: &T| sink.borrow_mut().push(value.clone()));
        (seen, sub)
    }

    #[test]
    fn test_set_notifies_even_when_equal() {
        let field = Observable::new(String::from("bob"));
        let (seen, _sub) = collect(&field);

        field.set("bob".to_string());
        field.set("bobby".to_string());
        assert_eq!(*seen.borrow(), vec!["bob", "bob", "bobby"]);
    }

    #[test]
    fn test_stream_emits_current_value_first() {
        let field = Observable::new(7u32);
        let (seen, _sub) = collect(&field);
        assert_eq!(*seen.borrow(), vec![7]);
    }

    #[test]
    fn test_cancel_unsubscribes() {
        let field = Observable::new(0u32);
        let (seen, mut sub) = collect(&field);
        assert_eq!(field.observer_count(), 1);

        sub.cancel();
        assert_eq!(field.observer_count(), 0);

        field.set(1);
        assert_eq!(*seen.borrow(), vec![0]);
    }

    #[test]
    fn test_explicit_subscribe_and_unsubscribe() {
        let field = Observable::new(0u32);
        let total = Rc::new(Cell::new(0));
        let sink = Rc::clone(&total);
        let id = field.subscribe(move |v| sink.set(sink.get() + v));

        field.set(2);
        field.update(|v| *v += 3);
        assert_eq!(total.get(), 7);

        assert!(field.unsubscribe(id));
        assert!(!field.unsubscribe(id));
        field.set(100);
        assert_eq!(total.get(), 7);
    }

    #[test]
    fn test_observer_may_write_back() {
        let field = Observable::new(String::new());
        let writer = field.clone();
        let _id = field.subscribe(move |value: &String| {
            let trimmed = value.trim();
            if trimmed != value.as_str() {
                writer.set(trimmed.to_string());
            }
        });

        field.set("  padded ".to_string());
        assert_eq!(field.get(), "padded");
    }

    #[test]
    fn test_stream_after_drop_is_inert() {
        let field = Observable::new(1u8);
        let stream = field.stream();
        drop(field);

        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let sub = stream.subscribe(move |_| sink.set(sink.get() + 1));
        assert!(sub.is_closed());
        assert_eq!(hits.get(), 0);
    }
}
