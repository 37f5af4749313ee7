//! In-memory event store.
//!
//! Events are keyed by id. Each record sits behind its own mutex so mutations
//! serialize per event while different events stay fully independent; the
//! outer lock only guards map membership and is never held across expansion
//! work.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use kalends_core::{CalendarEvent, EventId};

/// Handle to one stored event and its single-writer lock.
pub type EventSlot = Arc<Mutex<CalendarEvent>>;

/// In-memory store of calendar events.
#[derive(Debug, Default)]
pub struct EventStore {
    events: RwLock<HashMap<EventId, EventSlot>>,
}

impl EventStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new event record.
    pub async fn insert(&self, event: CalendarEvent) {
        let id = event.id;
        self.events
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(event)));
    }

    /// Returns the per-event slot, if the event exists.
    pub async fn slot(&self, id: EventId) -> Option<EventSlot> {
        self.events.read().await.get(&id).cloned()
    }

    /// Clones a point-in-time snapshot of the event.
    pub async fn snapshot(&self, id: EventId) -> Option<CalendarEvent> {
        let slot = self.slot(id).await?;
        let event = slot.lock().await;
        Some(event.clone())
    }

    /// Removes the event record. Returns whether it existed.
    pub async fn remove(&self, id: EventId) -> bool {
        self.events.write().await.remove(&id).is_some()
    }

    /// Number of stored events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Whether the store holds no events.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
