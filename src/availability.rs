//! Username availability check
//!
//! The engine asks an [`AvailabilityCheck`] whether a debounced username may be
//! used. A real implementation would query an account service and emit its answer
//! later; the shipped [`LengthCheck`] answers immediately from the username length.

use crate::reactive::Stream;

/// Resolves a candidate username to its accepted form, or `None` if unusable.
///
/// The returned stream should emit exactly once. Implementations may normalize
/// the name (the engine writes an accepted value back into the form).
pub trait AvailabilityCheck {
    fn check(&self, username: &str) -> Stream<Option<String>>;
}

/// Accepts any username whose character count is within `min..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthCheck {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthCheck {
    fn default() -> Self {
        Self { min: 5, max: 16 }
    }
}

impl LengthCheck {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn accepts(&self, username: &str) -> bool {
        (self.min..=self.max).contains(&username.chars().count())
    }
}

impl AvailabilityCheck for LengthCheck {
    fn check(&self, username: &str) -> Stream<Option<String>> {
        Stream::just(self.accepts(username).then(|| username.to_string()))
    }
}
