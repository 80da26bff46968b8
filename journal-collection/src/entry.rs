//! Photo entries

use crate::preview::{PreviewHandle, PreviewRegistry};
use crate::source::ImageSource;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One user-added photo
///
/// Owns its image bytes and its preview reference exclusively. Dropping the
/// entry releases both.
#[derive(Debug)]
pub struct PhotoEntry {
    id: Uuid,
    source: ImageSource,
    preview: PreviewHandle,
    added_at: DateTime<Utc>,
    notes: Option<String>,
    uploaded: bool,
}

impl PhotoEntry {
    /// Create a pending entry stamped with `added_at`
    pub(crate) fn new(source: ImageSource, previews: &PreviewRegistry, added_at: DateTime<Utc>) -> Self {
        let id = journal_common::uuid_utils::generate();
        Self {
            id,
            preview: previews.acquire(id),
            source,
            added_at,
            notes: None,
            uploaded: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Raw image bytes
    pub fn image_data(&self) -> &[u8] {
        &self.source.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.source.name
    }

    pub fn media_type(&self) -> &str {
        &self.source.media_type
    }

    pub fn preview_uri(&self) -> &str {
        self.preview.uri()
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_uploaded(&self) -> bool {
        self.uploaded
    }

    /// Size of the held image in bytes
    pub fn byte_len(&self) -> u64 {
        self.source.bytes.len() as u64
    }

    pub(crate) fn set_notes(&mut self, notes: Option<String>) {
        // Blank annotations are stored as absent
        self.notes = notes.filter(|n| !n.trim().is_empty());
    }

    /// Uploaded is monotonic; there is no way back to pending
    pub(crate) fn mark_uploaded(&mut self) {
        self.uploaded = true;
    }
}
