//! Per-path classification and the escalation rule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::path::PathKey;

/// Outcome of comparing one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Equal,
    /// Present in the left document only.
    LeftOnly,
    /// Present in the right document only.
    RightOnly,
    /// Present on both sides with different values.
    Changed,
}

impl Status {
    /// Escalation order: `Equal < LeftOnly = RightOnly < Changed`.
    pub fn priority(self) -> u8 {
        match self {
            Status::Equal => 0,
            Status::LeftOnly | Status::RightOnly => 1,
            Status::Changed => 2,
        }
    }

    pub fn is_presence_only(self) -> bool {
        matches!(self, Status::LeftOnly | Status::RightOnly)
    }
}

/// Path → status map for one side of a comparison.
///
/// `Equal` is never stored: a missing entry means equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusMap(BTreeMap<PathKey, Status>);

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `status` at `key` without ever downgrading.
    ///
    /// An empty slot or a lower-priority entry is overwritten; an existing
    /// presence-only entry is kept against another presence-only status.
    /// Repeating a call is a no-op.
    pub fn escalate(&mut self, key: PathKey, status: Status) {
        if status == Status::Equal {
            return;
        }
        match self.0.get(&key) {
            Some(prev) if prev.priority() >= status.priority() => {}
            _ => {
                self.0.insert(key, status);
            }
        }
    }

    /// Stored status; `None` means equal.
    pub fn get(&self, key: &PathKey) -> Option<Status> {
        self.0.get(key).copied()
    }

    /// Stored status, with absence reported as [`Status::Equal`].
    pub fn status_of(&self, key: &PathKey) -> Status {
        self.get(key).unwrap_or(Status::Equal)
    }

    pub fn remove(&mut self, key: &PathKey) -> Option<Status> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &PathKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, Status)> {
        self.0.iter().map(|(k, s)| (k, *s))
    }

    pub fn count(&self, status: Status) -> usize {
        self.0.values().filter(|s| **s == status).count()
    }

    pub fn keys_with(&self, status: Status) -> impl Iterator<Item = &PathKey> {
        self.0
            .iter()
            .filter(move |(_, s)| **s == status)
            .map(|(k, _)| k)
    }
}
