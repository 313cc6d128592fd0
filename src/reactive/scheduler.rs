//! Single-threaded timer scheduler
//!
//! The scheduler is the explicit stand-in for a UI run loop. Nothing fires on its
//! own: the owner calls [`Scheduler::run_due`] between input events, and uses
//! [`Scheduler::next_deadline`] to decide how long it may block waiting for input.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a manual clock frozen at the current instant
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Handle for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Timer {
    id: TimerId,
    deadline: Instant,
    task: Box<dyn FnOnce()>,
}

struct Inner {
    clock: Box<dyn Clock>,
    timers: RefCell<Vec<Timer>>,
    next_id: Cell<u64>,
}

/// Cloneable handle to a timer queue. Clones share the queue.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<Inner>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Create a scheduler driven by the given clock
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                clock: Box::new(clock),
                timers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Scheduler backed by the wall clock
    pub fn system() -> Self {
        Self::new(SystemClock)
    }

    /// Scheduler backed by a [`ManualClock`]; the returned clock handle drives it
    pub fn manual() -> (Self, ManualClock) {
        let clock = ManualClock::new();
        (Self::new(clock.clone()), clock)
    }

    pub fn now(&self) -> Instant {
        self.inner.clock.now()
    }

    /// Queue `task` to run once `delay` has elapsed
    pub fn schedule_after(&self, delay: Duration, task: impl FnOnce() + 'static) -> TimerId {
        let id = TimerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);

        let deadline = self.now() + delay;
        self.inner.timers.borrow_mut().push(Timer {
            id,
            deadline,
            task: Box::new(task),
        });
        id
    }

    /// Remove a pending timer. Returns false if it already ran or was cancelled.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut timers = self.inner.timers.borrow_mut();
        let before = timers.len();
        timers.retain(|timer| timer.id != id);
        timers.len() != before
    }

    /// Run every timer whose deadline has passed, earliest first.
    ///
    /// Tasks run with the queue unborrowed, so they may schedule or cancel.
    /// Returns the number of tasks run.
    pub fn run_due(&self) -> usize {
        let mut ran = 0;
        while let Some(timer) = self.pop_due() {
            (timer.task)();
            ran += 1;
        }
        ran
    }

    fn pop_due(&self) -> Option<Timer> {
        let now = self.now();
        let mut timers = self.inner.timers.borrow_mut();
        let index = timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline <= now)
            .min_by_key(|(_, timer)| (timer.deadline, timer.id))
            .map(|(index, _)| index)?;
        Some(timers.remove(index))
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner
            .timers
            .borrow()
            .iter()
            .map(|timer| timer.deadline)
            .min()
    }

    /// Number of timers waiting to fire
    pub fn pending(&self) -> usize {
        self.inner.timers.borrow().len()
    }
}
