//! Tests for the validation pipeline
//!
//! These tests verify:
//! - The documented scenarios (valid credentials, short username, short password)
//! - Debounce and duplicate suppression on the username
//! - Submit state tracking the credentials in both directions
//! - Subscription teardown on disappear

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use signup_tui::reactive::{ManualClock, Scheduler, Stream, Subscription};
use signup_tui::{AvailabilityCheck, LengthCheck, ValidationEngine, ValidationRules};

const DEBOUNCE: Duration = Duration::from_millis(100);

fn engine() -> (ValidationEngine, Scheduler, ManualClock) {
    let (scheduler, clock) = Scheduler::manual();
    let engine = ValidationEngine::new(scheduler.clone(), ValidationRules::default());
    (engine, scheduler, clock)
}

fn settle(scheduler: &Scheduler, clock: &ManualClock) {
    clock.advance(DEBOUNCE);
    scheduler.run_due();
}

fn record<T: Clone + 'static>(stream: &Stream<T>) -> (Rc<RefCell<Vec<T>>>, Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let sub = stream.subscribe(move |value: &T| sink.borrow_mut().push(value.clone()));
    (seen, sub)
}

/// Availability check that counts how often it is consulted
struct CountingCheck {
    inner: LengthCheck,
    calls: Rc<Cell<usize>>,
}

impl AvailabilityCheck for CountingCheck {
    fn check(&self, username: &str) -> Stream<Option<String>> {
        self.calls.set(self.calls.get() + 1);
        self.inner.check(username)
    }
}

/// Availability check that lowercases accepted names
struct LowercaseCheck;

impl AvailabilityCheck for LowercaseCheck {
    fn check(&self, username: &str) -> Stream<Option<String>> {
        let accepted = LengthCheck::default()
            .accepts(username)
            .then(|| username.to_lowercase());
        Stream::just(accepted)
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_valid_credentials_enable_submit() {
    let (mut engine, scheduler, clock) = engine();
    engine.on_appear();
    let (usernames, _u) = record(&engine.observe_validated_username());
    let (passwords, _p) = record(&engine.observe_validated_password());

    engine.set_username("alice123");
    engine.set_password("secretpw");
    engine.set_password_confirm("secretpw");
    settle(&scheduler, &clock);

    assert_eq!(usernames.borrow().last(), Some(&Some("alice123".to_string())));
    assert_eq!(passwords.borrow().last(), Some(&Some("secretpw".to_string())));
    assert!(!engine.submit_disabled());
}

#[test]
fn test_short_username_disables_submit_regardless_of_password() {
    let (mut engine, scheduler, clock) = engine();
    engine.on_appear();

    engine.set_username("ab");
    engine.set_password("secretpw");
    engine.set_password_confirm("secretpw");
    settle(&scheduler, &clock);

    assert!(engine.submit_disabled());
    assert_eq!(engine.invalid_username_reports(), 1);
    // Rejection never rewrites the field.
    assert_eq!(engine.username(), "ab");
}

#[test]
fn test_short_password_disables_submit() {
    let (mut engine, scheduler, clock) = engine();
    engine.on_appear();
    let (passwords, _p) = record(&engine.observe_validated_password());

    engine.set_username("alice123");
    engine.set_password("short");
    engine.set_password_confirm("short");
    settle(&scheduler, &clock);

    assert_eq!(passwords.borrow().last(), Some(&None));
    assert!(engine.submit_disabled());
}

#[test]
fn test_mismatched_confirmation_disables_submit() {
    let (mut engine, scheduler, clock) = engine();
    engine.on_appear();

    engine.set_username("alice123");
    engine.set_password("secretpw");
    engine.set_password_confirm("secretpx");
    settle(&scheduler, &clock);

    assert!(engine.submit_disabled());
}

// =============================================================================
// Timing and duplicate suppression
// =============================================================================

#[test]
fn test_password_validates_synchronously() {
    let (engine, _scheduler, _clock) = engine();
    let (passwords, _p) = record(&engine.observe_validated_password());

    engine.set_password("secretpw");
    engine.set_password_confirm("secretpw");

    assert_eq!(
        *passwords.borrow(),
        vec![None, None, Some("secretpw".to_string())]
    );
}

#[test]
fn test_username_waits_for_quiet_period() {
    let (engine, scheduler, clock) = engine();
    let (usernames, _u) = record(&engine.observe_validated_username());
    settle(&scheduler, &clock);
    assert_eq!(*usernames.borrow(), vec![None]);

    for partial in ["a", "al", "ali", "alic", "alice"] {
        engine.set_username(partial);
        clock.advance(Duration::from_millis(30));
        scheduler.run_due();
    }
    assert_eq!(usernames.borrow().len(), 1);

    clock.advance(DEBOUNCE);
    scheduler.run_due();
    assert_eq!(
        *usernames.borrow(),
        vec![None, Some("alice".to_string())]
    );
}

#[test]
fn test_repeated_username_does_not_recheck() {
    let (scheduler, clock) = Scheduler::manual();
    let calls = Rc::new(Cell::new(0));
    let checker = CountingCheck {
        inner: LengthCheck::default(),
        calls: Rc::clone(&calls),
    };
    let engine =
        ValidationEngine::with_checker(scheduler.clone(), ValidationRules::default(), Rc::new(checker));
    let (usernames, _u) = record(&engine.observe_validated_username());

    settle(&scheduler, &clock);
    assert_eq!(calls.get(), 1);

    engine.set_username("alice123");
    settle(&scheduler, &clock);
    assert_eq!(calls.get(), 2);

    engine.set_username("alice123");
    settle(&scheduler, &clock);
    assert_eq!(calls.get(), 2);
    assert_eq!(usernames.borrow().len(), 2);

    engine.set_username("bob");
    settle(&scheduler, &clock);
    assert_eq!(calls.get(), 3);
}

// =============================================================================
// Submit state
// =============================================================================

#[test]
fn test_submit_disabled_until_first_credentials() {
    let (mut engine, scheduler, clock) = engine();
    assert!(engine.submit_disabled());

    engine.on_appear();
    engine.set_password("secretpw");
    engine.set_password_confirm("secretpw");
    assert!(engine.submit_disabled());

    engine.set_username("alice123");
    assert!(engine.submit_disabled());
    settle(&scheduler, &clock);
    assert!(!engine.submit_disabled());
}

#[test]
fn test_submit_disables_again_when_password_breaks() {
    let (mut engine, scheduler, clock) = engine();
    engine.on_appear();
    engine.set_username("alice123");
    engine.set_password("secretpw");
    engine.set_password_confirm("secretpw");
    settle(&scheduler, &clock);
    assert!(!engine.submit_disabled());

    engine.set_password_confirm("secretp");
    assert!(engine.submit_disabled());

    engine.set_password_confirm("secretpw");
    assert!(!engine.submit_disabled());
}

#[test]
fn test_submit_disables_again_when_username_breaks() {
    let (mut engine, scheduler, clock) = engine();
    engine.on_appear();
    engine.set_username("alice123");
    engine.set_password("secretpw");
    engine.set_password_confirm("secretpw");
    settle(&scheduler, &clock);

    engine.set_username("al");
    assert!(!engine.submit_disabled());
    settle(&scheduler, &clock);
    assert!(engine.submit_disabled());
}

#[test]
fn test_accepted_username_is_written_back_normalized() {
    let (scheduler, clock) = Scheduler::manual();
    let mut engine = ValidationEngine::with_checker(
        scheduler.clone(),
        ValidationRules::default(),
        Rc::new(LowercaseCheck),
    );
    engine.on_appear();

    engine.set_username("Alice123");
    settle(&scheduler, &clock);
    assert_eq!(engine.username(), "alice123");
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_disappear_cancels_pending_work() {
    let (mut engine, scheduler, clock) = engine();
    engine.on_appear();
    engine.set_username("alice123");
    engine.set_password("secretpw");
    engine.set_password_confirm("secretpw");
    assert!(scheduler.pending() > 0);

    engine.on_disappear();
    assert_eq!(scheduler.pending(), 0);
    assert!(!engine.is_active());

    settle(&scheduler, &clock);
    assert!(engine.submit_disabled());
}

#[test]
fn test_disappear_without_appear_is_safe() {
    let (mut engine, _scheduler, _clock) = engine();
    engine.on_disappear();
    engine.on_disappear();
    assert!(!engine.is_active());
}

#[test]
fn test_reappear_resumes_validation() {
    let (mut engine, scheduler, clock) = engine();
    engine.on_appear();
    engine.on_disappear();

    engine.set_username("alice123");
    engine.set_password("secretpw");
    engine.set_password_confirm("secretpw");
    settle(&scheduler, &clock);
    assert!(engine.submit_disabled());

    engine.on_appear();
    settle(&scheduler, &clock);
    assert!(!engine.submit_disabled());
}

#[test]
fn test_custom_rules_are_applied() {
    let (scheduler, clock) = Scheduler::manual();
    let rules = ValidationRules {
        username_min_len: 2,
        username_max_len: 4,
        password_min_len: 3,
        debounce: Duration::from_millis(10),
    };
    let mut engine = ValidationEngine::new(scheduler.clone(), rules);
    engine.on_appear();

    engine.set_username("ab");
    engine.set_password("abc");
    engine.set_password_confirm("abc");
    clock.advance(Duration::from_millis(10));
    scheduler.run_due();
    assert!(!engine.submit_disabled());
}
