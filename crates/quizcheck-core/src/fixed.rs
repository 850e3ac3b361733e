//! # Fixed-Point Module
//!
//! One-decimal fixed-point values for shares and averages.
//!
//! The core does no floating-point arithmetic. A `Tenths` stores ten times
//! the value it represents and rounds half up on construction.

use serde::{Serialize, Serializer};
use std::fmt;

/// A non-negative decimal with one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tenths(u64);

impl Tenths {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// From a raw tenths count (`123` is `12.3`).
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw tenths count.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// `numerator / denominator`, rounded half up. Zero when `denominator` is 0.
    #[must_use]
    pub fn ratio(numerator: u64, denominator: u64) -> Self {
        Self(round_div(numerator.saturating_mul(10), denominator))
    }

    /// `part / whole` as a percentage, rounded half up. Zero when `whole` is 0.
    #[must_use]
    pub fn percent(part: u64, whole: u64) -> Self {
        Self(round_div(part.saturating_mul(1000), whole))
    }

    /// Integer part.
    #[must_use]
    pub const fn whole(self) -> u64 {
        self.0 / 10
    }

    /// Fractional digit.
    #[must_use]
    pub const fn fraction(self) -> u64 {
        self.0 % 10
    }
}

fn round_div(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    numerator.saturating_add(denominator / 2) / denominator
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{}.{}", self.whole(), self.fraction());
        f.pad(&text)
    }
}

impl Serialize for Tenths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
