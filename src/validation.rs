//! Form validation engine
//!
//! Holds the raw form fields and derives validity from them as streams:
//!
//! ```text
//! username ──debounce──dedup──availability──┐
//!                                          combine_latest ── credentials ── submit_disabled
//! password ─┐                               │
//!           combine_latest ── password rule ┘
//! confirm ──┘
//! ```
//!
//! `submit_disabled` names the *disabled* state: it is `true` while the
//! credentials are incomplete and starts out `true`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::availability::{AvailabilityCheck, LengthCheck};
use crate::reactive::{Observable, Scheduler, Stream, SubscriptionBag};

/// Limits applied by the validation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Shortest accepted username, in characters
    pub username_min_len: usize,
    /// Longest accepted username, in characters
    pub username_max_len: usize,
    /// Shortest accepted password, in characters
    pub password_min_len: usize,
    /// Quiet period before a username is checked
    pub debounce: Duration,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            username_min_len: 5,
            username_max_len: 16,
            password_min_len: 8,
            debounce: Duration::from_millis(100),
        }
    }
}

/// Password rule: both entries match and meet the minimum length.
pub fn validate_password(password: &str, confirm: &str, min_len: usize) -> Option<String> {
    (password == confirm && password.chars().count() >= min_len).then(|| password.to_string())
}

/// View-model for the signup form
pub struct ValidationEngine {
    scheduler: Scheduler,
    rules: ValidationRules,
    checker: Rc<dyn AvailabilityCheck>,
    username: Observable<String>,
    password: Observable<String>,
    password_confirm: Observable<String>,
    submit_disabled: Observable<bool>,
    invalid_username_reports: Rc<Cell<usize>>,
    subscriptions: SubscriptionBag,
    active: bool,
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("rules", &self.rules)
            .field("username", &self.username.get())
            .field("submit_disabled", &self.submit_disabled.get())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl ValidationEngine {
    /// Create an engine using the length-based availability check
    pub fn new(scheduler: Scheduler, rules: ValidationRules) -> Self {
        let checker = LengthCheck::new(rules.username_min_len, rules.username_max_len);
        Self::with_checker(scheduler, rules, Rc::new(checker))
    }

    /// Create an engine with a custom availability check
    pub fn with_checker(
        scheduler: Scheduler,
        rules: ValidationRules,
        checker: Rc<dyn AvailabilityCheck>,
    ) -> Self {
        Self {
            scheduler,
            rules,
            checker,
            username: Observable::default(),
            password: Observable::default(),
            password_confirm: Observable::default(),
            submit_disabled: Observable::new(true),
            invalid_username_reports: Rc::new(Cell::new(0)),
            subscriptions: SubscriptionBag::new(),
            active: false,
        }
    }

    pub fn set_username(&self, value: impl Into<String>) {
        self.username.set(value.into());
    }

    pub fn set_password(&self, value: impl Into<String>) {
        self.password.set(value.into());
    }

    pub fn set_password_confirm(&self, value: impl Into<String>) {
        self.password_confirm.set(value.into());
    }

    pub fn username(&self) -> String {
        self.username.get()
    }

    pub fn password(&self) -> String {
        self.password.get()
    }

    pub fn password_confirm(&self) -> String {
        self.password_confirm.get()
    }

    /// True while the credentials are incomplete
    pub fn submit_disabled(&self) -> bool {
        self.submit_disabled.get()
    }

    /// Whether `on_appear` subscriptions are live
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How many times a debounced username was rejected
    pub fn invalid_username_reports(&self) -> usize {
        self.invalid_username_reports.get()
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Debounced, de-duplicated username run through the availability check
    pub fn observe_validated_username(&self) -> Stream<Option<String>> {
        let checker = Rc::clone(&self.checker);
        self.username
            .stream()
            .debounce(self.rules.debounce, &self.scheduler)
            .remove_duplicates()
            .flat_map(move |username: &String| checker.check(username))
    }

    /// Password, present when both entries agree and are long enough
    pub fn observe_validated_password(&self) -> Stream<Option<String>> {
        let min_len = self.rules.password_min_len;
        self.password
            .stream()
            .combine_latest(&self.password_confirm.stream())
            .map(move |(password, confirm): &(String, String)| {
                validate_password(password, confirm, min_len)
            })
    }

    /// `(username, password)` once both halves validate
    pub fn observe_validated_credentials(&self) -> Stream<Option<(String, String)>> {
        self.observe_validated_username()
            .combine_latest(&self.observe_validated_password())
            .map(|(username, password): &(Option<String>, Option<String>)| {
                username.clone().zip(password.clone())
            })
    }

    /// Start the form's subscriptions.
    ///
    /// An accepted username is written back into the field when it differs from
    /// what was typed; a rejected one is only logged. The credentials drive
    /// `submit_disabled`.
    pub fn on_appear(&mut self) {
        if self.active {
            debug!("validation already active, ignoring on_appear");
            return;
        }
        info!("starting form validation");

        let username = self.username.clone();
        let reports = Rc::clone(&self.invalid_username_reports);
        self.observe_validated_username()
            .subscribe(move |value: &Option<String>| match value {
                Some(accepted) => {
                    debug!(username = %accepted, "username accepted");
                    if username.get() != *accepted {
                        username.set(accepted.clone());
                    }
                }
                None => {
                    reports.set(reports.get() + 1);
                    warn!("invalid username");
                }
            })
            .store_in(&mut self.subscriptions);

        let submit_disabled = self.submit_disabled.clone();
        self.observe_validated_credentials()
            .subscribe(move |credentials: &Option<(String, String)>| {
                let disabled = credentials.is_none();
                if disabled != submit_disabled.get() {
                    debug!(disabled, "submit state changed");
                }
                submit_disabled.set(disabled);
            })
            .store_in(&mut self.subscriptions);

        self.active = true;
    }

    /// Cancel every subscription and pending timer. Safe to call repeatedly.
    pub fn on_disappear(&mut self) {
        if self.active {
            info!("stopping form validation");
        }
        self.subscriptions.cancel_all();
        self.active = false;
    }
}
