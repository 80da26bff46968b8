//! Collection change events and the EventBus
//!
//! The presentation layer subscribes to [`CollectionEvent`]s and re-renders
//! from a fresh collection snapshot whenever one arrives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Photo collection change events
///
/// Serialized with an internal `type` tag so they can be forwarded as JSON
/// without a wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CollectionEvent {
    /// A batch of entries was prepended to the collection
    EntriesAdded {
        /// New entry ids in batch order
        entry_ids: Vec<Uuid>,
        /// When the batch was added
        timestamp: DateTime<Utc>,
    },

    /// One entry was removed
    EntryDeleted {
        entry_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// Collection emptied by an explicit clear
    CollectionCleared {
        /// Number of entries released
        removed: usize,
        timestamp: DateTime<Utc>,
    },

    /// Annotation set or cleared on an entry
    NotesChanged {
        entry_id: Uuid,
        timestamp: DateTime<Utc>,
    },

    /// Upload began for `entry_count` entries
    UploadStarted {
        entry_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Upload finished; `uploaded` entries were marked as uploaded
    UploadCompleted {
        uploaded: usize,
        timestamp: DateTime<Utc>,
    },

    /// Detail view selection changed (None = selection cleared)
    SelectionChanged {
        entry_id: Option<Uuid>,
        timestamp: DateTime<Utc>,
    },

    /// Detail view closed (selection retained)
    ViewClosed {
        timestamp: DateTime<Utc>,
    },
}

impl CollectionEvent {
    /// Event type name, as it appears in the serialized `type` tag
    pub fn event_type(&self) -> &'static str {
        match self {
            CollectionEvent::EntriesAdded { .. } => "EntriesAdded",
            CollectionEvent::EntryDeleted { .. } => "EntryDeleted",
            CollectionEvent::CollectionCleared { .. } => "CollectionCleared",
            CollectionEvent::NotesChanged { .. } => "NotesChanged",
            CollectionEvent::UploadStarted { .. } => "UploadStarted",
            CollectionEvent::UploadCompleted { .. } => "UploadCompleted",
            CollectionEvent::SelectionChanged { .. } => "SelectionChanged",
            CollectionEvent::ViewClosed { .. } => "ViewClosed",
        }
    }
}

/// Broadcast bus for [`CollectionEvent`]s
///
/// Cloning shares the underlying channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CollectionEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer per subscriber before the
    ///   oldest ones are dropped. Must be non-zero.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<CollectionEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    ///
    /// A headless collection (no presentation attached) is a normal state.
    pub fn emit_lossy(&self, event: CollectionEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let event = CollectionEvent::CollectionCleared {
            removed: 3,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "CollectionCleared");
        assert_eq!(json["removed"], 3);
        assert_eq!(json["type"], event.event_type());
    }

    #[test]
    fn test_event_round_trips_through_json() {
        let event = CollectionEvent::SelectionChanged {
            entry_id: Some(Uuid::new_v4()),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: CollectionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_emit_lossy_without_subscribers_is_fine() {
        let bus = EventBus::new(4);
        assert_eq!(bus.subscriber_count(), 0);
        bus.emit_lossy(CollectionEvent::ViewClosed { timestamp: Utc::now() });
        assert_eq!(bus.capacity(), 4);
    }

    #[tokio::test]
    async fn test_subscriber_receives_emitted_event() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit_lossy(CollectionEvent::UploadStarted {
            entry_count: 2,
            timestamp: Utc::now(),
        });

        match rx.recv().await.unwrap() {
            CollectionEvent::UploadStarted { entry_count, .. } => assert_eq!(entry_count, 2),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
