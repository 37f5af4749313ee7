//! Materializing occurrences over a query window.
//!
//! [`Expansion`] turns an event snapshot plus a [`TimeWindow`] into the
//! ordered stream of concrete [`Occurrence`]s that overlap the window,
//! with suppressed occurrences filtered out. This is a pure read path: it
//! never mutates the event and performs no I/O, so snapshots can be expanded
//! concurrently from any number of tasks.

use tracing::trace;

use crate::event::{CalendarEvent, Occurrence};
use crate::recurrence::OccurrenceIter;
use crate::time::TimeWindow;

/// Lazy occurrence stream for one event over one window.
///
/// Yields in non-decreasing start order with no duplicates. A window strictly
/// past the end of the series yields nothing — an empty result, not an error.
#[derive(Debug)]
pub struct Expansion<'a> {
    event: &'a CalendarEvent,
    window: TimeWindow,
    cursor: Cursor,
}

#[derive(Debug)]
enum Cursor {
    /// Non-recurring event: the base occurrence, considered at most once.
    Single { done: bool },
    /// Recurring event: live rule cursor, already skipped ahead to the
    /// window.
    Recurring(OccurrenceIter),
}

impl<'a> Expansion<'a> {
    /// Prepares the stream, skipping the rule cursor ahead to the first
    /// candidate whose occurrence could still reach into the window.
    pub fn new(event: &'a CalendarEvent, window: TimeWindow) -> Self {
        let cursor = match &event.recurrence {
            None => Cursor::Single { done: false },
            Some(rule) => {
                let mut iter = OccurrenceIter::new(event.start_ts, rule);
                // A candidate is visible iff start + duration > window.start,
                // so the first interesting start is window.start - duration,
                // exclusive. Candidates before the window that span into it
                // must not be skipped.
                let floor = window
                    .start()
                    .saturating_sub(event.duration)
                    .saturating_add(1);
                iter.advance_to(floor);
                Cursor::Recurring(iter)
            }
        };
        Self {
            event,
            window,
            cursor,
        }
    }
}

impl Iterator for Expansion<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Occurrence> {
        match &mut self.cursor {
            Cursor::Single { done } => {
                if *done {
                    return None;
                }
                *done = true;
                let occ = Occurrence::starting_at(self.event.start_ts, self.event.duration);
                let visible = self.window.overlaps(occ.start_ts, occ.end_ts)
                    && !self.event.exceptions.contains(occ.start_ts);
                visible.then_some(occ)
            }
            Cursor::Recurring(iter) => {
                while let Some(start) = iter.next() {
                    if start >= self.window.end() {
                        return None;
                    }
                    if self.event.exceptions.contains(start) {
                        continue;
                    }
                    return Some(Occurrence::starting_at(start, self.event.duration));
                }
                None
            }
        }
    }
}

/// Materializes every occurrence of `event` that overlaps `window`.
pub fn expand(event: &CalendarEvent, window: TimeWindow) -> Vec<Occurrence> {
    let occurrences: Vec<Occurrence> = Expansion::new(event, window).collect();
    trace!(event = %event.id, count = occurrences.len(), "expanded window");
    occurrences
}
