//! Event service: in-memory store, mutation controller, instance queries.
//!
//! This crate is the stateful half of kalends. It owns calendar event
//! records, serializes mutations per event, and answers instance queries by
//! expanding immutable snapshots with `kalends-core`. A transport layer in
//! front of it (HTTP, IPC — out of scope here) maps [`ServiceError`] variants
//! to client-facing responses.
//!
//! # Example
//!
//! ```rust,no_run
//! use kalends_core::{CalendarId, Frequency, RecurrenceRule};
//! use kalends_service::{CreateEvent, EventService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = EventService::new();
//!
//!     let event = service
//!         .create_event(CreateEvent {
//!             calendar_id: CalendarId::new("team"),
//!             start_ts: 1_000,
//!             duration: 1_000,
//!             recurrence: Some(RecurrenceRule::new(Frequency::Daily, 1).with_count(10)),
//!         })
//!         .await?;
//!
//!     let instances = service
//!         .get_instances(event.id, 20, 86_400_000 * 11)
//!         .await?;
//!     assert_eq!(instances.len(), 10);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod service;
mod store;

pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use service::{CreateEvent, EventService, UpdateEvent};
pub use store::{EventSlot, EventStore};
