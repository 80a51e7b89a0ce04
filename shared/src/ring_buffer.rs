//! Fixed-capacity FIFO used for spin and hit history.
//!
//! Appending to a full buffer evicts the oldest element, so `len() <= N`
//! holds after every operation.

use serde::{Serialize, Serializer};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBuffer<T, const N: usize> {
    items: VecDeque<T>,
}

impl<T, const N: usize> RingBuffer<T, N> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(N),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == N
    }

    /// Appends `value`, returning the evicted oldest element when the
    /// buffer was already full.
    pub fn push(&mut self, value: T) -> Option<T> {
        if N == 0 {
            return None;
        }
        let evicted = if self.items.len() == N {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(value);
        evicted
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces the contents with the last `N` items yielded by `values`.
    pub fn replace_with<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.items.clear();
        for value in values {
            self.push(value);
        }
    }

    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T: Clone, const N: usize> RingBuffer<T, N> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

impl<T, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize, const N: usize> Serialize for RingBuffer<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}
