//! signup-tui library
//!
//! A terminal account-creation form: three inputs feed a reactive validation
//! pipeline that decides whether the submit button is enabled.

pub mod app;
pub mod availability;
pub mod check;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod reactive;
pub mod theme;
pub mod ui;
pub mod validation;

// Re-export main types for convenience
pub use availability::{AvailabilityCheck, LengthCheck};
pub use check::{run_check, CheckReport};
pub use config::FormConfig;
pub use error::SignupError;
pub use reactive::{Observable, Scheduler, Stream, Subscription, SubscriptionBag};
pub use ui::{FormAction, FormField, FormView};
pub use validation::{validate_password, ValidationEngine, ValidationRules};
