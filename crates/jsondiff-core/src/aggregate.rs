//! Summary counts over a finished comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::{Status, StatusMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DiffCounts {
    /// Paths missing on the right.
    pub left_only: usize,
    /// Paths missing on the left.
    pub right_only: usize,
    /// Paths present on both sides with unequal values.
    pub changed: usize,
}

impl DiffCounts {
    /// Count both maps in one pass each.
    ///
    /// `Changed` entries are mirrored into both maps, so they are taken from
    /// the left map only.
    pub fn tally(left: &StatusMap, right: &StatusMap) -> Self {
        let mut counts = DiffCounts::default();
        for (_, status) in left.iter() {
            match status {
                Status::LeftOnly => counts.left_only += 1,
                Status::Changed => counts.changed += 1,
                Status::Equal | Status::RightOnly => {}
            }
        }
        counts.right_only = right.count(Status::RightOnly);
        counts
    }

    pub fn missing(&self) -> usize {
        self.left_only + self.right_only
    }

    pub fn total(&self) -> usize {
        self.missing() + self.changed
    }

    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DiffCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total() {
            1 => f.write_str("1 difference"),
            n => write!(f, "{n} differences"),
        }
    }
}
