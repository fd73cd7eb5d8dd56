//! Signed values: a positive magnitude plus a "barred" flag.
//!
//! Ordering places every unbarred value below every barred one:
//! `1 < 2 < ... < n < n̄ < ... < 2̄ < 1̄`.

use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroU32;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

/// Suffix marking a barred value in the textual point notation (`3b` is 3̄).
pub const BAR_MARKER: char = 'b';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("signed value magnitude must be at least 1")]
    ZeroMagnitude,
}

/// An ordered, negatable scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedValue {
    magnitude: NonZeroU32,
    barred: bool,
}

impl SignedValue {
    pub fn new(magnitude: u32, barred: bool) -> Result<Self, ValueError> {
        let magnitude = NonZeroU32::new(magnitude).ok_or(ValueError::ZeroMagnitude)?;
        Ok(Self::from_nonzero(magnitude, barred))
    }

    pub const fn from_nonzero(magnitude: NonZeroU32, barred: bool) -> Self {
        Self { magnitude, barred }
    }

    /// Unbarred value `m`.
    pub fn plain(magnitude: u32) -> Result<Self, ValueError> {
        Self::new(magnitude, false)
    }

    /// Barred value `m̄`.
    pub fn bar(magnitude: u32) -> Result<Self, ValueError> {
        Self::new(magnitude, true)
    }

    pub fn magnitude(&self) -> u32 {
        self.magnitude.get()
    }

    pub fn is_barred(&self) -> bool {
        self.barred
    }

    /// Position on the single ordering axis. Unbarred values rank by
    /// magnitude in `1..=u32::MAX`; barred values rank in
    /// `u32::MAX + 1..=2 * u32::MAX`, descending in magnitude.
    pub fn rank(&self) -> i64 {
        let m = i64::from(self.magnitude.get());
        if self.barred {
            2 * i64::from(u32::MAX) + 1 - m
        } else {
            m
        }
    }
}

impl Ord for SignedValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for SignedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Neg for SignedValue {
    type Output = SignedValue;

    fn neg(self) -> SignedValue {
        SignedValue {
            magnitude: self.magnitude,
            barred: !self.barred,
        }
    }
}

impl fmt::Display for SignedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.barred {
            write!(f, "{}{BAR_MARKER}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}
