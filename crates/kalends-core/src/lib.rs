//! Core engine: time windows, recurrence evaluation, exceptions, expansion.
//!
//! This crate is the pure, computation-only half of kalends. It knows how to:
//! - step timestamps by calendar-aware intervals ([`time`])
//! - evaluate a recurrence rule into a lazy occurrence sequence ([`recurrence`])
//! - record per-occurrence suppressions ([`exception`])
//! - materialize the occurrences of an event over a query window ([`expand`])
//!
//! Everything here operates on immutable event snapshots and performs no I/O,
//! so it is safe to call concurrently. The stateful service layer lives in
//! `kalends-service`.

pub mod error;
pub mod event;
pub mod exception;
pub mod expand;
pub mod recurrence;
pub mod time;
pub mod tracing;

pub use error::{DomainError, DomainResult};
pub use event::{CalendarEvent, CalendarId, EventId, Occurrence};
pub use exception::{ExceptionKind, ExceptionSet};
pub use expand::{Expansion, expand};
pub use recurrence::{Frequency, OccurrenceIter, RecurrenceRule};
pub use time::{MS_PER_DAY, MS_PER_WEEK, TimeWindow, advance};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
