//! Service error types.

use kalends_core::{DomainError, EventId};
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the event service.
///
/// Not-found and invalid-argument failures stay distinct variants so the
/// transport layer in front of this service can map them to different client
/// responses. Nothing here is retryable; every failure is synchronous and
/// happens before any expansion work.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Referenced event does not exist.
    #[error("event not found: {id}")]
    EventNotFound { id: EventId },

    /// Invalid input, rejected up front.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Window span exceeds the configured guard.
    #[error("window spans {span} ms, above the configured maximum of {max} ms")]
    WindowTooLarge { span: i64, max: i64 },
}

impl ServiceError {
    /// Creates a not-found error.
    pub fn not_found(id: EventId) -> Self {
        Self::EventNotFound { id }
    }

    /// Whether the failure should map to a not-found client response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EventNotFound { .. })
    }

    /// Whether the failure should map to an invalid-argument client response.
    pub fn is_invalid_argument(&self) -> bool {
        !self.is_not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        let id = EventId::generate();
        assert!(ServiceError::not_found(id).is_not_found());
        assert!(!ServiceError::not_found(id).is_invalid_argument());

        let invalid = ServiceError::from(DomainError::ZeroInterval);
        assert!(invalid.is_invalid_argument());
        assert!(!invalid.is_not_found());

        let too_large = ServiceError::WindowTooLarge { span: 10, max: 5 };
        assert!(too_large.is_invalid_argument());
    }

    #[test]
    fn domain_errors_pass_through_display() {
        let err = ServiceError::from(DomainError::InvalidWindow { start: 2, end: 1 });
        assert_eq!(err.to_string(), "invalid window: start_ts 2 is after end_ts 1");
    }
}
