/// Tempo value type
use crate::error::SoulError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Beats per minute
///
/// Always positive and never above [`Bpm::MAX_VALUE`]. Values outside of
/// this range cannot be constructed and are treated as "no tempo".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Bpm(f64);

impl Bpm {
    /// Exclusive lower bound
    pub const MIN_VALUE: f64 = 0.0;

    /// Inclusive upper bound of a plausible tempo
    pub const MAX_VALUE: f64 = 300.0;

    /// Create a tempo if `value` is within the valid range
    pub fn new(value: f64) -> Option<Self> {
        Self::is_valid_value(value).then_some(Self(value))
    }

    /// Check whether `value` is a valid tempo
    pub fn is_valid_value(value: f64) -> bool {
        value.is_finite() && value > Self::MIN_VALUE && value <= Self::MAX_VALUE
    }

    /// Parse a raw decimal number without range checks
    ///
    /// Leading and trailing whitespace is ignored. Returns `None` for
    /// anything that is not a finite number.
    pub fn parse_value(text: &str) -> Option<f64> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Parse a tempo from its textual representation
    pub fn parse(text: &str) -> Option<Self> {
        Self::parse_value(text).and_then(Self::new)
    }

    /// Get the tempo value
    pub fn value(self) -> f64 {
        self.0
    }

    /// Integer representation, truncating any fractional digits
    pub fn to_integer(self) -> u32 {
        self.0.trunc() as u32
    }
}

impl TryFrom<f64> for Bpm {
    type Error = SoulError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(SoulError::InvalidBpm(value))
    }
}

impl From<Bpm> for f64 {
    fn from(bpm: Bpm) -> Self {
        bpm.0
    }
}

impl fmt::Display for Bpm {
    /// Shortest decimal representation that parses back to the same value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
