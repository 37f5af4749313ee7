//! The calendar event data model.
//!
//! A [`CalendarEvent`] is a base occurrence (anchor timestamp plus duration),
//! an optional [`RecurrenceRule`], and the [`ExceptionSet`] recorded against
//! the occurrences that rule generates. [`Occurrence`] is the derived,
//! never-stored output of expansion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::exception::ExceptionSet;
use crate::recurrence::RecurrenceRule;

/// Unique identifier for a calendar event, assigned at creation and immutable
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Reference to the calendar an event belongs to.
///
/// Calendars live in a collaborating service; this engine treats the id as
/// opaque and never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(String);

impl CalendarId {
    /// Wraps a calendar reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CalendarId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One concrete time instance of an event.
///
/// Produced on demand by expansion, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// Absolute start, epoch milliseconds.
    pub start_ts: i64,
    /// Absolute end, epoch milliseconds; `start_ts + duration`.
    pub end_ts: i64,
}

impl Occurrence {
    /// Builds the occurrence starting at `start_ts` with the given duration.
    pub fn starting_at(start_ts: i64, duration: i64) -> Self {
        Self {
            start_ts,
            end_ts: start_ts.saturating_add(duration),
        }
    }
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Unique id, assigned at creation.
    pub id: EventId,
    /// Owning calendar reference.
    pub calendar_id: CalendarId,
    /// Absolute start of the base occurrence and anchor of the recurrence
    /// sequence, in epoch milliseconds.
    pub start_ts: i64,
    /// Occurrence length in milliseconds, non-negative.
    pub duration: i64,
    /// Recurrence descriptor; `None` means a single occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    /// Suppressed occurrence timestamps, interpreted against the current
    /// anchor's generation sequence.
    #[serde(default, skip_serializing_if = "ExceptionSet::is_empty")]
    pub exceptions: ExceptionSet,
}

impl CalendarEvent {
    /// Creates a non-recurring event with a fresh id.
    pub fn new(calendar_id: CalendarId, start_ts: i64, duration: i64) -> Self {
        Self {
            id: EventId::generate(),
            calendar_id,
            start_ts,
            duration,
            recurrence: None,
            exceptions: ExceptionSet::new(),
        }
    }

    /// Builder: attach a recurrence rule.
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    /// Whether the event repeats.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// End of the base occurrence.
    pub fn base_end_ts(&self) -> i64 {
        self.start_ts.saturating_add(self.duration)
    }

    /// Checks the construction invariants: non-negative duration and, when a
    /// rule is present, a valid rule.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.duration < 0 {
            return Err(DomainError::NegativeDuration(self.duration));
        }
        if let Some(rule) = &self.recurrence {
            rule.validate()?;
        }
        Ok(())
    }

    /// Moves the anchor.
    ///
    /// A changed anchor re-bases the entire occurrence sequence, so any
    /// recorded exceptions refer to timestamps that will no longer be
    /// generated; they are cleared in the same step. Setting the current
    /// value again changes nothing. Returns `true` if stale exceptions were
    /// dropped.
    pub fn reschedule(&mut self, new_start_ts: i64) -> bool {
        if new_start_ts == self.start_ts {
            return false;
        }
        self.start_ts = new_start_ts;
        let had_exceptions = !self.exceptions.is_empty();
        self.exceptions.clear();
        had_exceptions
    }
}
