use std::fmt;

use crate::constants::{MAX_SPIN, MIN_SPIN, PAGE_COUNT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    InvalidSpin(i64),
    InvalidSpinText(String),
    InvalidPageIndex(usize),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpin(n) => write!(
                f,
                "Invalid spin {}: must be between {} and {}",
                n, MIN_SPIN, MAX_SPIN
            ),
            Self::InvalidSpinText(text) => write!(f, "Invalid spin input: {:?}", text),
            Self::InvalidPageIndex(i) => write!(
                f,
                "Invalid page index {}: must be below {}",
                i, PAGE_COUNT
            ),
        }
    }
}

impl std::error::Error for TrackerError {}
