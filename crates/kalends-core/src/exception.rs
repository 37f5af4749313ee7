//! Per-occurrence exception overrides.
//!
//! An exception suppresses one concrete occurrence of a recurring event,
//! keyed by that occurrence's start timestamp. The set is owned exclusively
//! by its event and is only ever cleared wholesale, when the event anchor
//! moves and the recorded timestamps stop corresponding to generated
//! occurrences.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The override applied to a single occurrence.
///
/// Only suppression exists today; the kind is carried per entry so richer
/// overrides (reschedule, detail change) can slot in without a model change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionKind {
    /// The occurrence is dropped from expansion output.
    #[default]
    Suppressed,
}

/// Suppressed occurrence timestamps for one event.
///
/// Lookup is O(1) amortized; expansion consults the set once per candidate.
/// Entries for timestamps the rule never generates are inert: recorded, but
/// never matched. On the wire the set is a plain array of timestamps, sorted
/// ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<i64>", into = "Vec<i64>")]
pub struct ExceptionSet {
    entries: HashMap<i64, ExceptionKind>,
}

impl ExceptionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a suppression for `ts`. Re-inserting an existing timestamp is
    /// a no-op.
    pub fn add(&mut self, ts: i64) {
        self.entries.insert(ts, ExceptionKind::Suppressed);
    }

    /// Whether `ts` is suppressed.
    pub fn contains(&self, ts: i64) -> bool {
        self.entries.contains_key(&ts)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded exceptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Suppressed timestamps in ascending order.
    pub fn timestamps(&self) -> Vec<i64> {
        let mut out: Vec<i64> = self.entries.keys().copied().collect();
        out.sort_unstable();
        out
    }
}

impl From<Vec<i64>> for ExceptionSet {
    fn from(timestamps: Vec<i64>) -> Self {
        let entries = timestamps
            .into_iter()
            .map(|ts| (ts, ExceptionKind::Suppressed))
            .collect();
        Self { entries }
    }
}

impl From<ExceptionSet> for Vec<i64> {
    fn from(set: ExceptionSet) -> Self {
        set.timestamps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut set = ExceptionSet::new();
        set.add(1000);
        set.add(1000);

        assert_eq!(set.len(), 1);
        assert!(set.contains(1000));
        assert!(!set.contains(1001));
    }

    #[test]
    fn clear_empties_the_set() {
        let mut set = ExceptionSet::new();
        set.add(1);
        set.add(2);
        assert!(!set.is_empty());

        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(1));
    }

    #[test]
    fn timestamps_are_sorted() {
        let mut set = ExceptionSet::new();
        set.add(300);
        set.add(100);
        set.add(200);

        assert_eq!(set.timestamps(), vec![100, 200, 300]);
    }

    #[test]
    fn serde_array_representation() {
        let mut set = ExceptionSet::new();
        set.add(2000);
        set.add(1000);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[1000,2000]");

        let parsed: ExceptionSet = serde_json::from_str("[1000,2000,1000]").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed, set);
    }
}
