//! Photo collection manager
//!
//! Owns the ordered entry list (newest first), the detail-view selection and
//! the upload-in-progress flag. Every operation is total: unknown ids and
//! ill-timed requests are no-ops, never errors.
//!
//! State lives behind a `std::sync::Mutex` that is never held across an
//! `.await`, so reads are served while an upload is suspended.

use crate::entry::PhotoEntry;
use crate::preview::PreviewRegistry;
use crate::snapshot::{completion_percentage, CollectionSnapshot, EntryView};
use crate::source::ImageSource;
use crate::uploader::{SimulatedUploader, Uploader};
use journal_common::config::CollectionConfig;
use journal_common::events::{CollectionEvent, EventBus};
use journal_common::time;
use journal_common::uuid_utils;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of an upload request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Upload ran; `uploaded` entries were marked at completion
    Completed { uploaded: usize },
    /// Request ignored, nothing changed
    Skipped(UploadSkipped),
}

/// Why an upload request was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSkipped {
    /// Nothing to upload
    EmptyCollection,
    /// Another upload has not finished yet
    AlreadyInProgress,
}

#[derive(Default)]
struct CollectionState {
    /// Newest first
    entries: Vec<PhotoEntry>,
    upload_in_progress: bool,
    selected: Option<Uuid>,
    view_open: bool,
    held_bytes: u64,
    memory_warned: bool,
}

impl CollectionState {
    fn position(&self, id: Uuid) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == id)
    }

    fn uploaded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_uploaded()).count()
    }
}

/// Explicit state holder for the photo journal UI
///
/// Starts empty, with no selection and no upload running.
pub struct PhotoCollection {
    state: Mutex<CollectionState>,
    previews: PreviewRegistry,
    uploader: Arc<dyn Uploader>,
    events: EventBus,
    soft_memory_limit_bytes: u64,
}

impl PhotoCollection {
    /// Collection with the simulated uploader from `config`
    pub fn new(config: &CollectionConfig) -> Self {
        Self::with_uploader(config, Arc::new(SimulatedUploader::new(config.upload_latency())))
    }

    /// Collection with a caller-supplied uploader
    pub fn with_uploader(config: &CollectionConfig, uploader: Arc<dyn Uploader>) -> Self {
        Self {
            state: Mutex::new(CollectionState::default()),
            previews: PreviewRegistry::new(),
            uploader,
            events: EventBus::new(config.event_capacity.max(1)),
            soft_memory_limit_bytes: config.soft_memory_limit_bytes,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Prepend one pending entry per source, keeping the batch's order
    ///
    /// Returns the new ids in batch order. An empty batch changes nothing.
    pub fn add_entries(&self, files: Vec<ImageSource>) -> Vec<Uuid> {
        if files.is_empty() {
            return Vec::new();
        }

        let added_at = time::now();
        let mut batch: Vec<PhotoEntry> = files
            .into_iter()
            .map(|source| PhotoEntry::new(source, &self.previews, added_at))
            .collect();
        let entry_ids: Vec<Uuid> = batch.iter().map(PhotoEntry::id).collect();
        let batch_bytes: u64 = batch.iter().map(PhotoEntry::byte_len).sum();

        let (total, held_bytes, crossed_limit) = {
            let mut state = self.lock();
            batch.append(&mut state.entries);
            state.entries = batch;
            state.held_bytes += batch_bytes;
            let crossed = !state.memory_warned && state.held_bytes > self.soft_memory_limit_bytes;
            if crossed {
                state.memory_warned = true;
            }
            (state.entries.len(), state.held_bytes, crossed)
        };

        info!("Added {} photos ({} total)", entry_ids.len(), total);
        if crossed_limit {
            warn!(
                "Photo collection holds {} bytes, above the {} byte soft limit; nothing is evicted",
                held_bytes, self.soft_memory_limit_bytes
            );
        }

        self.events.emit_lossy(CollectionEvent::EntriesAdded {
            entry_ids: entry_ids.clone(),
            timestamp: time::now(),
        });
        entry_ids
    }

    /// Mark every entry as uploaded once the uploader returns
    ///
    /// Skipped (no state change, no events) when the collection is empty or
    /// another upload is still running. The uploader receives the ids present
    /// at call time; completion marks every entry present at completion,
    /// including ones added while the upload was suspended.
    pub async fn begin_upload(&self) -> UploadOutcome {
        let entry_ids: Vec<Uuid> = {
            let mut state = self.lock();
            if state.upload_in_progress {
                debug!("Upload request ignored: upload already in progress");
                return UploadOutcome::Skipped(UploadSkipped::AlreadyInProgress);
            }
            if state.entries.is_empty() {
                debug!("Upload request ignored: collection is empty");
                return UploadOutcome::Skipped(UploadSkipped::EmptyCollection);
            }
            state.upload_in_progress = true;
            state.entries.iter().map(PhotoEntry::id).collect()
        };
        let mut flag = InProgressFlag::new(&self.state);

        info!("Uploading {} photos", entry_ids.len());
        self.events.emit_lossy(CollectionEvent::UploadStarted {
            entry_count: entry_ids.len(),
            timestamp: time::now(),
        });

        self.uploader.upload(&entry_ids).await;

        let uploaded = {
            let mut state = self.lock();
            state.entries.iter_mut().for_each(PhotoEntry::mark_uploaded);
            state.upload_in_progress = false;
            state.entries.len()
        };
        flag.disarm();

        info!("Upload complete: {} photos marked uploaded", uploaded);
        self.events.emit_lossy(CollectionEvent::UploadCompleted {
            uploaded,
            timestamp: time::now(),
        });
        UploadOutcome::Completed { uploaded }
    }

    /// Run [`begin_upload`](Self::begin_upload) on the runtime so it finishes
    /// even if the caller stops waiting
    pub fn spawn_upload(self: &Arc<Self>) -> JoinHandle<UploadOutcome> {
        let collection = Arc::clone(self);
        tokio::spawn(async move { collection.begin_upload().await })
    }

    /// Remove one entry; returns false (and changes nothing) if `id` is unknown
    ///
    /// Deleting the selected entry also clears the selection and closes the view.
    pub fn delete_entry(&self, id: Uuid) -> bool {
        let (removed, selection_cleared) = {
            let mut state = self.lock();
            let Some(index) = state.position(id) else {
                return false;
            };
            let removed = state.entries.remove(index);
            state.held_bytes = state.held_bytes.saturating_sub(removed.byte_len());
            if state.held_bytes <= self.soft_memory_limit_bytes {
                state.memory_warned = false;
            }
            let selection_cleared = state.selected == Some(id);
            if selection_cleared {
                state.selected = None;
                state.view_open = false;
            }
            (removed, selection_cleared)
        };
        // Image bytes and preview released here
        drop(removed);

        debug!("Deleted photo {}", uuid_utils::short(&id));
        let timestamp = time::now();
        self.events.emit_lossy(CollectionEvent::EntryDeleted { entry_id: id, timestamp });
        if selection_cleared {
            self.events.emit_lossy(CollectionEvent::SelectionChanged {
                entry_id: None,
                timestamp,
            });
        }
        true
    }

    /// Drop every entry and the selection
    pub fn clear_all(&self) {
        let removed = {
            let mut state = self.lock();
            state.selected = None;
            state.view_open = false;
            state.held_bytes = 0;
            state.memory_warned = false;
            std::mem::take(&mut state.entries)
        };
        let count = removed.len();
        drop(removed);

        info!(
            "Cleared photo collection ({} removed, {} previews still live)",
            count,
            self.previews.live_count()
        );
        self.events.emit_lossy(CollectionEvent::CollectionCleared {
            removed: count,
            timestamp: time::now(),
        });
    }

    /// Select an entry for the detail view and open it
    ///
    /// Unknown ids leave selection and view untouched and return false.
    pub fn select_for_view(&self, id: Uuid) -> bool {
        {
            let mut state = self.lock();
            if state.position(id).is_none() {
                return false;
            }
            state.selected = Some(id);
            state.view_open = true;
        }
        self.events.emit_lossy(CollectionEvent::SelectionChanged {
            entry_id: Some(id),
            timestamp: time::now(),
        });
        true
    }

    /// Close the detail view; the selection itself is kept
    pub fn close_view(&self) {
        let was_open = std::mem::replace(&mut self.lock().view_open, false);
        if was_open {
            self.events.emit_lossy(CollectionEvent::ViewClosed { timestamp: time::now() });
        }
    }

    /// Set or clear an entry's annotation; returns false if `id` is unknown
    pub fn set_notes(&self, id: Uuid, notes: Option<String>) -> bool {
        {
            let mut state = self.lock();
            let Some(index) = state.position(id) else {
                return false;
            };
            state.entries[index].set_notes(notes);
        }
        self.events.emit_lossy(CollectionEvent::NotesChanged {
            entry_id: id,
            timestamp: time::now(),
        });
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    pub fn uploaded_count(&self) -> usize {
        self.lock().uploaded_count()
    }

    /// `round(100 * uploaded / total)`, 0 when empty
    pub fn completion_percentage(&self) -> u8 {
        let state = self.lock();
        completion_percentage(state.uploaded_count(), state.entries.len())
    }

    pub fn is_upload_in_progress(&self) -> bool {
        self.lock().upload_in_progress
    }

    pub fn is_view_open(&self) -> bool {
        self.lock().view_open
    }

    /// Ids in display order (newest first)
    pub fn entry_ids(&self) -> Vec<Uuid> {
        self.lock().entries.iter().map(PhotoEntry::id).collect()
    }

    pub fn entry(&self, id: Uuid) -> Option<EntryView> {
        let state = self.lock();
        state.position(id).map(|i| EntryView::from(&state.entries[i]))
    }

    pub fn selected_entry(&self) -> Option<EntryView> {
        let state = self.lock();
        let id = state.selected?;
        state.position(id).map(|i| EntryView::from(&state.entries[i]))
    }

    /// Total bytes of image data currently held
    pub fn held_bytes(&self) -> u64 {
        self.lock().held_bytes
    }

    /// Consistent copy of everything the presentation layer renders
    pub fn snapshot(&self) -> CollectionSnapshot {
        let state = self.lock();
        let entries: Vec<EntryView> = state.entries.iter().map(EntryView::from).collect();
        let uploaded_count = state.uploaded_count();
        CollectionSnapshot {
            total_count: entries.len(),
            uploaded_count,
            completion_percentage: completion_percentage(uploaded_count, entries.len()),
            upload_in_progress: state.upload_in_progress,
            selected_entry_id: state.selected,
            view_open: state.view_open,
            entries,
        }
    }

    /// Change notifications for re-rendering
    pub fn subscribe(&self) -> broadcast::Receiver<CollectionEvent> {
        self.events.subscribe()
    }

    /// Registry the presentation layer resolves preview URIs against
    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    fn lock(&self) -> MutexGuard<'_, CollectionState> {
        lock_state(&self.state)
    }
}

// Every mutation leaves the state consistent before any call that could
// panic, so a poisoned lock is still safe to use
fn lock_state(state: &Mutex<CollectionState>) -> MutexGuard<'_, CollectionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the in-progress flag if an upload future is dropped before completion
struct InProgressFlag<'a> {
    state: &'a Mutex<CollectionState>,
    armed: bool,
}

impl<'a> InProgressFlag<'a> {
    fn new(state: &'a Mutex<CollectionState>) -> Self {
        Self { state, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for InProgressFlag<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Upload abandoned before completion; entries left pending");
            lock_state(self.state).upload_in_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn photo(name: &str) -> ImageSource {
        ImageSource::new(name, vec![0xFF, 0xD8, 0xFF, 0xE0])
    }

    fn instant_collection() -> PhotoCollection {
        let config = CollectionConfig {
            upload_latency_ms: 0,
            ..CollectionConfig::default()
        };
        PhotoCollection::new(&config)
    }

    #[test]
    fn test_initial_state() {
        let collection = instant_collection();
        assert!(collection.is_empty());
        assert_eq!(collection.uploaded_count(), 0);
        assert_eq!(collection.completion_percentage(), 0);
        assert!(!collection.is_upload_in_progress());
        assert!(!collection.is_view_open());
        assert!(collection.selected_entry().is_none());
    }

    #[test]
    fn test_add_empty_batch_is_noop() {
        let collection = instant_collection();
        let mut rx = collection.subscribe();

        assert!(collection.add_entries(Vec::new()).is_empty());

        assert!(collection.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_add_entries_tracks_held_bytes() {
        let collection = instant_collection();
        collection.add_entries(vec![photo("a.jpg"), photo("b.jpg")]);
        assert_eq!(collection.held_bytes(), 8);

        let first = collection.entry_ids()[0];
        collection.delete_entry(first);
        assert_eq!(collection.held_bytes(), 4);

        collection.clear_all();
        assert_eq!(collection.held_bytes(), 0);
    }

    #[test]
    fn test_soft_memory_limit_does_not_evict() {
        let config = CollectionConfig {
            soft_memory_limit_bytes: 4,
            ..CollectionConfig::default()
        };
        let collection = PhotoCollection::new(&config);

        collection.add_entries(vec![photo("a.jpg"), photo("b.jpg"), photo("c.jpg")]);

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.held_bytes(), 12);
    }

    #[test]
    fn test_same_content_is_not_deduplicated() {
        let collection = instant_collection();
        let ids = collection.add_entries(vec![photo("same.jpg"), photo("same.jpg")]);
        assert_eq!(collection.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_set_notes_unknown_id_is_noop() {
        let collection = instant_collection();
        collection.add_entries(vec![photo("a.jpg")]);
        assert!(!collection.set_notes(Uuid::new_v4(), Some("x".to_string())));

        let id = collection.entry_ids()[0];
        assert!(collection.set_notes(id, Some("crown, morning light".to_string())));
        assert_eq!(
            collection.entry(id).unwrap().notes.as_deref(),
            Some("crown, morning light")
        );
    }

    #[test]
    fn test_close_view_keeps_selection() {
        let collection = instant_collection();
        let ids = collection.add_entries(vec![photo("a.jpg")]);

        assert!(collection.select_for_view(ids[0]));
        assert!(collection.is_view_open());

        collection.close_view();
        assert!(!collection.is_view_open());
        assert_eq!(collection.selected_entry().unwrap().id, ids[0]);
    }

    #[tokio::test]
    async fn test_dropped_upload_future_releases_flag() {
        let config = CollectionConfig {
            upload_latency_ms: 60_000,
            ..CollectionConfig::default()
        };
        let collection = PhotoCollection::new(&config);
        collection.add_entries(vec![photo("a.jpg")]);

        let timed_out = tokio::time::timeout(Duration::from_millis(20), collection.begin_upload()).await;
        assert!(timed_out.is_err());

        assert!(!collection.is_upload_in_progress());
        assert_eq!(collection.uploaded_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_event_capacity_still_delivers_events() {
        let config = CollectionConfig {
            upload_latency_ms: 0,
            event_capacity: 0,
            ..CollectionConfig::default()
        };
        let collection = PhotoCollection::new(&config);
        let mut rx = collection.subscribe();

        collection.add_entries(vec![photo("a.jpg")]);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type(), "EntriesAdded");
    }

    #[tokio::test]
    async fn test_spawned_upload_completes() {
        let collection = Arc::new(instant_collection());
        collection.add_entries(vec![photo("a.jpg"), photo("b.jpg")]);

        let outcome = collection.spawn_upload().await.unwrap();

        assert_eq!(outcome, UploadOutcome::Completed { uploaded: 2 });
        assert_eq!(collection.completion_percentage(), 100);
    }
}
