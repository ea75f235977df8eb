use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Inclusive span of years in which the primary branch has commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl YearRange {
    /// Build a range, rejecting a first year after the last one.
    pub fn new(first: i32, last: i32) -> Option<Self> {
        (first <= last).then_some(Self { first, last })
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.first..=self.last
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.years().collect()
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    pub fn len(&self) -> usize {
        (self.last - self.first) as usize + 1
    }

    /// Never true: a range holds at least one year.
    pub fn is_empty(&self) -> bool {
        false
    }
}
