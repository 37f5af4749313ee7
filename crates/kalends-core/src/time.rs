//! Time interval primitives for the expansion engine.
//!
//! All timestamps are absolute milliseconds since the Unix epoch. Daily and
//! weekly steps are exact millisecond multiples; monthly and yearly steps go
//! through calendar-field arithmetic so variable month and year lengths come
//! out right.

use chrono::{DateTime, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::recurrence::Frequency;

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Milliseconds in one week.
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Mean Gregorian month length in milliseconds. Only used to estimate
/// skip-ahead positions for monthly rules; exact stepping always goes through
/// [`advance`].
pub(crate) const MS_PER_MEAN_MONTH: i64 = 2_629_746_000;

/// Mean Gregorian year length in milliseconds. Estimation counterpart of
/// [`MS_PER_MEAN_MONTH`] for yearly rules.
pub(crate) const MS_PER_MEAN_YEAR: i64 = 31_556_952_000;

/// A query window over occurrence timestamps.
///
/// Half-open interval `[start, end)` in epoch milliseconds. Construction
/// rejects inverted bounds; an empty window (`start == end`) is valid and
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    start_ts: i64,
    end_ts: i64,
}

impl TimeWindow {
    /// Creates a window, rejecting `start > end`.
    pub fn new(start_ts: i64, end_ts: i64) -> Result<Self, DomainError> {
        if start_ts > end_ts {
            return Err(DomainError::InvalidWindow {
                start: start_ts,
                end: end_ts,
            });
        }
        Ok(Self { start_ts, end_ts })
    }

    /// Start of the window (inclusive).
    pub fn start(&self) -> i64 {
        self.start_ts
    }

    /// End of the window (exclusive).
    pub fn end(&self) -> i64 {
        self.end_ts
    }

    /// Span of the window in milliseconds.
    pub fn span(&self) -> i64 {
        self.end_ts - self.start_ts
    }

    /// Half-open overlap test against an occurrence `[occ_start, occ_end)`.
    pub fn overlaps(&self, occ_start: i64, occ_end: i64) -> bool {
        occ_start < self.end_ts && occ_end > self.start_ts
    }

    /// Whether `ts` falls inside the window.
    pub fn contains(&self, ts: i64) -> bool {
        self.start_ts <= ts && ts < self.end_ts
    }
}

/// Advances `anchor` by `steps` units of `frequency`.
///
/// Daily steps are exact 24-hour multiples and weekly steps 7-day multiples.
/// Monthly and yearly steps clamp the day of month: Jan 31 plus one month is
/// Feb 28 (or 29 in a leap year). Callers stepping a sequence must always
/// advance from the sequence anchor, not from the previous occurrence, so the
/// clamping never accumulates.
///
/// Returns `None` when the result falls outside the representable range;
/// `steps` is expected to be non-negative.
pub fn advance(anchor: i64, frequency: Frequency, steps: i64) -> Option<i64> {
    match frequency {
        Frequency::Daily => MS_PER_DAY
            .checked_mul(steps)
            .and_then(|delta| anchor.checked_add(delta)),
        Frequency::Weekly => MS_PER_WEEK
            .checked_mul(steps)
            .and_then(|delta| anchor.checked_add(delta)),
        Frequency::Monthly => advance_months(anchor, steps),
        Frequency::Yearly => steps
            .checked_mul(12)
            .and_then(|months| advance_months(anchor, months)),
    }
}

fn advance_months(anchor: i64, months: i64) -> Option<i64> {
    let months = u32::try_from(months).ok()?;
    let anchor = datetime_from_millis(anchor)?;
    anchor
        .checked_add_months(Months::new(months))
        .map(|dt| dt.timestamp_millis())
}

fn datetime_from_millis(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, s)
            .unwrap()
            .timestamp_millis()
    }

    mod window {
        use super::*;

        #[test]
        fn rejects_inverted_bounds() {
            let err = TimeWindow::new(10, 5).unwrap_err();
            assert_eq!(err, DomainError::InvalidWindow { start: 10, end: 5 });
        }

        #[test]
        fn accepts_empty_window() {
            let window = TimeWindow::new(100, 100).unwrap();
            assert_eq!(window.span(), 0);
            assert!(!window.overlaps(100, 200));
            assert!(!window.contains(100));
        }

        #[test]
        fn half_open_overlap() {
            let window = TimeWindow::new(1000, 2000).unwrap();

            // Fully inside.
            assert!(window.overlaps(1200, 1300));
            // Spanning the start boundary.
            assert!(window.overlaps(500, 1001));
            // Spanning the end boundary.
            assert!(window.overlaps(1999, 3000));
            // Touching the start from outside: occurrence ends exactly at
            // window start.
            assert!(!window.overlaps(500, 1000));
            // Touching the end from outside: occurrence starts exactly at
            // window end.
            assert!(!window.overlaps(2000, 2500));
        }

        #[test]
        fn zero_length_occurrence() {
            let window = TimeWindow::new(1000, 2000).unwrap();

            // Strictly inside the window it still counts.
            assert!(window.overlaps(1500, 1500));
            // On either boundary it does not.
            assert!(!window.overlaps(1000, 1000));
            assert!(!window.overlaps(2000, 2000));
        }

        #[test]
        fn serde_field_names() {
            let window = TimeWindow::new(1, 2).unwrap();
            let json = serde_json::to_value(window).unwrap();
            assert_eq!(json["startTs"], 1);
            assert_eq!(json["endTs"], 2);
        }
    }

    mod stepping {
        use super::*;

        #[test]
        fn daily_is_exact() {
            let anchor = ms(2025, 3, 10, 9, 30, 0);
            assert_eq!(advance(anchor, Frequency::Daily, 0), Some(anchor));
            assert_eq!(
                advance(anchor, Frequency::Daily, 3),
                Some(anchor + 3 * MS_PER_DAY)
            );
        }

        #[test]
        fn weekly_is_seven_days() {
            let anchor = ms(2025, 3, 10, 9, 30, 0);
            assert_eq!(
                advance(anchor, Frequency::Weekly, 2),
                Some(anchor + 2 * MS_PER_WEEK)
            );
        }

        #[test]
        fn monthly_clamps_day_of_month() {
            let anchor = ms(2025, 1, 31, 12, 0, 0);

            // Feb 2025 has 28 days.
            assert_eq!(
                advance(anchor, Frequency::Monthly, 1),
                Some(ms(2025, 2, 28, 12, 0, 0))
            );
            // Stepping from the anchor, March recovers the 31st.
            assert_eq!(
                advance(anchor, Frequency::Monthly, 2),
                Some(ms(2025, 3, 31, 12, 0, 0))
            );
        }

        #[test]
        fn monthly_clamps_to_leap_day() {
            let anchor = ms(2024, 1, 31, 0, 0, 0);
            assert_eq!(
                advance(anchor, Frequency::Monthly, 1),
                Some(ms(2024, 2, 29, 0, 0, 0))
            );
        }

        #[test]
        fn yearly_handles_leap_day_anchor() {
            let anchor = ms(2024, 2, 29, 8, 0, 0);

            assert_eq!(
                advance(anchor, Frequency::Yearly, 1),
                Some(ms(2025, 2, 28, 8, 0, 0))
            );
            assert_eq!(
                advance(anchor, Frequency::Yearly, 4),
                Some(ms(2028, 2, 29, 8, 0, 0))
            );
        }

        #[test]
        fn preserves_time_of_day_across_months() {
            let anchor = ms(2025, 4, 15, 23, 59, 59);
            assert_eq!(
                advance(anchor, Frequency::Monthly, 6),
                Some(ms(2025, 10, 15, 23, 59, 59))
            );
        }

        #[test]
        fn overflow_is_none() {
            assert_eq!(advance(i64::MAX - 10, Frequency::Daily, 2), None);
            assert_eq!(advance(0, Frequency::Monthly, -1), None);
        }
    }
}
