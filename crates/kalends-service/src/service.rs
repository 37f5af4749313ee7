//! The event service: mutation controller and instance queries.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use kalends_core::{
    CalendarEvent, CalendarId, EventId, Occurrence, RecurrenceRule, TimeWindow, expand,
};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::store::EventStore;

/// Fields for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    /// Owning calendar reference.
    pub calendar_id: CalendarId,
    /// Anchor timestamp, epoch milliseconds.
    pub start_ts: i64,
    /// Occurrence length in milliseconds, non-negative.
    pub duration: i64,
    /// Optional recurrence descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

/// Partial update of an event. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    /// New anchor timestamp. Moving the anchor clears recorded exceptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_ts: Option<i64>,
    /// New occurrence length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    /// Replacement recurrence descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

impl UpdateEvent {
    /// Builder: move the anchor.
    pub fn start_ts(mut self, start_ts: i64) -> Self {
        self.start_ts = Some(start_ts);
        self
    }

    /// Builder: change the duration.
    pub fn duration(mut self, duration: i64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Builder: replace the recurrence rule.
    pub fn recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }
}

/// Event service over an in-memory store.
///
/// Instance queries are pure reads over a snapshot and run concurrently
/// without restriction. Mutations serialize per event, so the
/// anchor-change/exception-clear step can never interleave with a concurrent
/// exception write or a snapshot read of the same event.
#[derive(Debug, Default)]
pub struct EventService {
    config: ServiceConfig,
    store: EventStore,
}

impl EventService {
    /// Creates a service with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with the given configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        Self {
            config,
            store: EventStore::new(),
        }
    }

    /// Creates an event and returns the stored record.
    pub async fn create_event(&self, input: CreateEvent) -> ServiceResult<CalendarEvent> {
        let mut event = CalendarEvent::new(input.calendar_id, input.start_ts, input.duration);
        event.recurrence = input.recurrence;
        event.validate()?;

        debug!(
            event = %event.id,
            calendar = %event.calendar_id,
            recurring = event.is_recurring(),
            "event created"
        );
        self.store.insert(event.clone()).await;
        Ok(event)
    }

    /// Returns a snapshot of the event.
    pub async fn get_event(&self, id: EventId) -> ServiceResult<CalendarEvent> {
        self.store
            .snapshot(id)
            .await
            .ok_or(ServiceError::EventNotFound { id })
    }

    /// Materializes the occurrences of `id` overlapping `[start_ts, end_ts)`.
    ///
    /// The window must satisfy `start_ts <= end_ts`; a window past the end of
    /// the series is valid and yields an empty list.
    pub async fn get_instances(
        &self,
        id: EventId,
        start_ts: i64,
        end_ts: i64,
    ) -> ServiceResult<Vec<Occurrence>> {
        let window = TimeWindow::new(start_ts, end_ts)?;
        if let Some(max) = self.config.max_window_span
            && window.span() > max
        {
            return Err(ServiceError::WindowTooLarge {
                span: window.span(),
                max,
            });
        }

        let event = self
            .store
            .snapshot(id)
            .await
            .ok_or(ServiceError::EventNotFound { id })?;
        let instances = expand(&event, window);
        trace!(event = %id, count = instances.len(), "instances materialized");
        Ok(instances)
    }

    /// Records a suppression for one occurrence of the event.
    ///
    /// Idempotent. The timestamp is stored as given: an entry that does not
    /// match a generated occurrence is inert and filters nothing.
    pub async fn create_exception(
        &self,
        id: EventId,
        exception_ts: i64,
    ) -> ServiceResult<CalendarEvent> {
        let slot = self
            .store
            .slot(id)
            .await
            .ok_or(ServiceError::EventNotFound { id })?;
        let mut event = slot.lock().await;
        event.exceptions.add(exception_ts);
        debug!(event = %id, exception_ts, "occurrence suppressed");
        Ok(event.clone())
    }

    /// Applies a partial update atomically.
    ///
    /// Moving the anchor re-bases the occurrence sequence; recorded
    /// exceptions refer to the old sequence and are cleared in the same
    /// critical section. Duration and rule changes leave exceptions alone. A
    /// failed validation leaves the stored record untouched.
    pub async fn update_event(
        &self,
        id: EventId,
        patch: UpdateEvent,
    ) -> ServiceResult<CalendarEvent> {
        let slot = self
            .store
            .slot(id)
            .await
            .ok_or(ServiceError::EventNotFound { id })?;
        let mut current = slot.lock().await;

        let mut updated = current.clone();
        if let Some(duration) = patch.duration {
            updated.duration = duration;
        }
        if let Some(rule) = patch.recurrence {
            updated.recurrence = Some(rule);
        }
        let mut rebased = false;
        if let Some(start_ts) = patch.start_ts {
            rebased = updated.reschedule(start_ts);
        }
        updated.validate()?;

        *current = updated.clone();
        if rebased {
            debug!(event = %id, start_ts = updated.start_ts, "anchor moved, stale exceptions dropped");
        }
        Ok(updated)
    }

    /// Deletes the event.
    pub async fn delete_event(&self, id: EventId) -> ServiceResult<()> {
        if self.store.remove(id).await {
            debug!(event = %id, "event deleted");
            Ok(())
        } else {
            Err(ServiceError::EventNotFound { id })
        }
    }
}
