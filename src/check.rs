//! Headless run of the validation pipeline
//!
//! Drives a [`ValidationEngine`] on a manual clock: the fields are set as if typed
//! in one burst, then time is advanced past the debounce window until no timers
//! remain.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::reactive::{Scheduler, Stream, Subscription};
use crate::validation::{ValidationEngine, ValidationRules};

/// Upper bound on debounce windows to wait through; an availability check that
/// keeps rewriting the username would otherwise never settle.
const MAX_SETTLE_ROUNDS: usize = 8;

/// Derived state after the pipeline settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub username: String,
    pub validated_username: Option<String>,
    pub password_valid: bool,
    pub submit_disabled: bool,
    pub invalid_username_reports: usize,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.validated_username {
            Some(name) => writeln!(f, "username: {} (valid)", name)?,
            None => writeln!(f, "username: {:?} (invalid)", self.username)?,
        }
        writeln!(
            f,
            "password: {}",
            if self.password_valid { "valid" } else { "invalid" }
        )?;
        write!(
            f,
            "submit:   {}",
            if self.submit_disabled { "disabled" } else { "enabled" }
        )
    }
}

fn record_latest<T: Clone + 'static>(stream: &Stream<T>) -> (Rc<RefCell<Option<T>>>, Subscription) {
    let latest = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&latest);
    let sub = stream.subscribe(move |value: &T| *sink.borrow_mut() = Some(value.clone()));
    (latest, sub)
}

/// Evaluate one set of inputs against `rules`
pub fn run_check(rules: ValidationRules, username: &str, password: &str, confirm: &str) -> CheckReport {
    let (scheduler, clock) = Scheduler::manual();
    let mut engine = ValidationEngine::new(scheduler.clone(), rules);
    engine.on_appear();

    let (validated_username, _username_sub) = record_latest(&engine.observe_validated_username());
    let (validated_password, _password_sub) = record_latest(&engine.observe_validated_password());

    engine.set_username(username);
    engine.set_password(password);
    engine.set_password_confirm(confirm);

    let mut rounds = 0;
    while scheduler.pending() > 0 && rounds < MAX_SETTLE_ROUNDS {
        clock.advance(rules.debounce);
        let ran = scheduler.run_due();
        debug!(round = rounds, ran, "advanced past debounce window");
        rounds += 1;
    }

    let report = CheckReport {
        username: engine.username(),
        validated_username: validated_username.borrow().clone().flatten(),
        password_valid: validated_password.borrow().clone().flatten().is_some(),
        submit_disabled: engine.submit_disabled(),
        invalid_username_reports: engine.invalid_username_reports(),
    };
    engine.on_disappear();
    report
}
