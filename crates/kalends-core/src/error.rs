//! Engine error types.

use thiserror::Error;

/// Result type for engine operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Validation failures for engine inputs.
///
/// These are all rejected before any expansion work happens; the engine never
/// retries and never returns a partially computed result. `EventNotFound`
/// lives in the service layer — this enum only covers the invalid-argument
/// class, so the two stay distinguishable at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Query window with `start > end`.
    #[error("invalid window: start_ts {start} is after end_ts {end}")]
    InvalidWindow { start: i64, end: i64 },

    /// Recurrence rule with a zero interval.
    #[error("invalid recurrence rule: interval must be at least 1")]
    ZeroInterval,

    /// Recurrence rule with an explicit occurrence count of zero.
    #[error("invalid recurrence rule: count must be at least 1 when set")]
    ZeroCount,

    /// Negative event duration.
    #[error("invalid duration: {0} ms is negative")]
    NegativeDuration(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = DomainError::InvalidWindow { start: 10, end: 5 };
        assert_eq!(
            err.to_string(),
            "invalid window: start_ts 10 is after end_ts 5"
        );
        assert_eq!(
            DomainError::NegativeDuration(-1).to_string(),
            "invalid duration: -1 ms is negative"
        );
    }
}
