//! Recurrence rules and their lazy evaluation.
//!
//! A [`RecurrenceRule`] describes how an event repeats; [`OccurrenceIter`]
//! turns it into an ordered stream of occurrence start timestamps. The
//! iterator carries explicit cursor state and supports closed-form skip-ahead
//! ([`OccurrenceIter::advance_to`]), so querying a window far in the future
//! never enumerates the skipped prefix.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::time::{self, MS_PER_DAY, MS_PER_MEAN_MONTH, MS_PER_MEAN_YEAR, MS_PER_WEEK};

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// A recurrence descriptor.
///
/// Occurrence `i` starts at the event anchor advanced by `i * interval` units
/// of `frequency`. The sequence ends after `count` occurrences or once a
/// candidate would start after `until`, whichever is reached first; with
/// neither bound set the sequence is unbounded and callers must window it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    /// Step unit.
    pub frequency: Frequency,
    /// Positive step width in units of `frequency`.
    pub interval: u32,
    /// Total number of occurrences, anchor included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Latest allowed occurrence start, inclusive, in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<i64>,
}

impl RecurrenceRule {
    /// Creates an unbounded rule.
    pub fn new(frequency: Frequency, interval: u32) -> Self {
        Self {
            frequency,
            interval,
            count: None,
            until: None,
        }
    }

    /// Builder: bound the rule to `count` total occurrences.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Builder: bound the rule to occurrences starting at or before `until`.
    pub fn with_until(mut self, until: i64) -> Self {
        self.until = Some(until);
        self
    }

    /// Whether the rule terminates on its own.
    pub fn is_bounded(&self) -> bool {
        self.count.is_some() || self.until.is_some()
    }

    /// Boundary validation for rules accepted from callers.
    ///
    /// The evaluator itself tolerates `count = 0` (empty sequence), but the
    /// service contract requires a positive count when one is given.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.interval == 0 {
            return Err(DomainError::ZeroInterval);
        }
        if self.count == Some(0) {
            return Err(DomainError::ZeroCount);
        }
        Ok(())
    }
}

/// Lazy cursor over the occurrence start timestamps of one rule.
///
/// Always yields in strictly increasing order with no repeats. The anchor is
/// candidate 0 and is yielded whenever `count != 0`, even if `until` predates
/// it: the anchor defines the first instance of the set and `until` only
/// bounds the candidates after it.
#[derive(Debug, Clone)]
pub struct OccurrenceIter {
    anchor_ts: i64,
    frequency: Frequency,
    interval: u32,
    count: Option<u32>,
    until: Option<i64>,
    index: i64,
    exhausted: bool,
}

impl OccurrenceIter {
    /// Creates a cursor at the start of the sequence.
    ///
    /// A zero `interval` is a caller contract violation (see
    /// [`RecurrenceRule::validate`]).
    pub fn new(anchor_ts: i64, rule: &RecurrenceRule) -> Self {
        debug_assert!(rule.interval >= 1, "recurrence interval must be positive");
        Self {
            anchor_ts,
            frequency: rule.frequency,
            interval: rule.interval,
            count: rule.count,
            until: rule.until,
            index: 0,
            exhausted: false,
        }
    }

    /// Start timestamp of candidate `index`, stepping from the anchor.
    fn candidate(&self, index: i64) -> Option<i64> {
        let steps = index.checked_mul(i64::from(self.interval))?;
        time::advance(self.anchor_ts, self.frequency, steps)
    }

    /// Positions the cursor so the next candidate is the first with
    /// `start >= floor`, without enumerating the skipped prefix.
    ///
    /// Daily and weekly rules land exactly by division. Monthly and yearly
    /// rules estimate the index from the mean Gregorian month/year length and
    /// then correct by stepping; the estimate drifts by at most a few days
    /// over the whole Gregorian cycle, so the correction walk is bounded no
    /// matter how far away `floor` is. The cursor never moves backwards, so
    /// count/until accounting stays exact.
    pub fn advance_to(&mut self, floor: i64) {
        if self.exhausted || floor <= self.anchor_ts {
            return;
        }
        let delta = floor - self.anchor_ts;
        let per_step = match self.frequency {
            Frequency::Daily => MS_PER_DAY,
            Frequency::Weekly => MS_PER_WEEK,
            Frequency::Monthly => MS_PER_MEAN_MONTH,
            Frequency::Yearly => MS_PER_MEAN_YEAR,
        }
        .saturating_mul(i64::from(self.interval));

        let index = match self.frequency {
            Frequency::Daily | Frequency::Weekly => delta
                .checked_add(per_step - 1)
                .map(|d| d / per_step)
                .unwrap_or(i64::MAX),
            Frequency::Monthly | Frequency::Yearly => {
                let mut index = delta / per_step;
                while index > 0 && self.candidate(index - 1).is_some_and(|ts| ts >= floor) {
                    index -= 1;
                }
                while self.candidate(index).is_some_and(|ts| ts < floor) {
                    index += 1;
                }
                index
            }
        };

        self.index = self.index.max(index);
    }
}

impl Iterator for OccurrenceIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.exhausted {
            return None;
        }
        if let Some(count) = self.count
            && self.index >= i64::from(count)
        {
            self.exhausted = true;
            return None;
        }
        let Some(start) = self.candidate(self.index) else {
            self.exhausted = true;
            return None;
        };
        if self.index > 0
            && let Some(until) = self.until
            && start > until
        {
            self.exhausted = true;
            return None;
        }
        self.index += 1;
        Some(start)
    }
}
