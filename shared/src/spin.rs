use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{MAX_SPIN, MIN_SPIN};
use crate::error::TrackerError;

/// A single roulette outcome in `0..=36`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i64", into = "u8")]
pub struct Spin(u8);

impl Spin {
    pub fn new(number: i64) -> Result<Self, TrackerError> {
        if (MIN_SPIN as i64..=MAX_SPIN as i64).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(TrackerError::InvalidSpin(number))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Spin {
    type Error = TrackerError;

    fn try_from(number: i64) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<Spin> for u8 {
    fn from(spin: Spin) -> Self {
        spin.0
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds a spin sequence from raw numbers, dropping anything out of range.
pub fn valid_spins<I>(numbers: I) -> Vec<Spin>
where
    I: IntoIterator<Item = i64>,
{
    numbers
        .into_iter()
        .filter_map(|n| Spin::new(n).ok())
        .collect()
}
