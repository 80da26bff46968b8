//! Read-side views handed to the presentation layer

use crate::entry::PhotoEntry;
use chrono::{DateTime, Local, Utc};
use journal_common::time::format_display_date;
use serde::Serialize;
use uuid::Uuid;

/// Render-ready copy of one entry (no image bytes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub id: Uuid,
    pub file_name: String,
    pub media_type: String,
    pub preview_uri: String,
    pub added_at: DateTime<Utc>,
    /// `added_at` as a short local calendar date, e.g. `Oct 16, 2026`
    pub display_date: String,
    pub notes: Option<String>,
    pub uploaded: bool,
    /// `Uploaded` or `Pending`
    pub status: &'static str,
}

impl From<&PhotoEntry> for EntryView {
    fn from(entry: &PhotoEntry) -> Self {
        Self {
            id: entry.id(),
            file_name: entry.file_name().to_string(),
            media_type: entry.media_type().to_string(),
            preview_uri: entry.preview_uri().to_string(),
            added_at: entry.added_at(),
            display_date: format_display_date(&entry.added_at().with_timezone(&Local)),
            notes: entry.notes().map(str::to_string),
            uploaded: entry.is_uploaded(),
            status: status_label(entry.is_uploaded()),
        }
    }
}

impl EntryView {
    /// Title for the detail dialog
    pub fn view_title(&self) -> String {
        format!("Photo - {}", self.display_date)
    }
}

/// Whole-collection view, newest entry first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSnapshot {
    pub entries: Vec<EntryView>,
    pub total_count: usize,
    pub uploaded_count: usize,
    pub completion_percentage: u8,
    pub upload_in_progress: bool,
    pub selected_entry_id: Option<Uuid>,
    pub view_open: bool,
}

impl CollectionSnapshot {
    /// Selected entry, if the selection is still in the collection
    pub fn selected(&self) -> Option<&EntryView> {
        let id = self.selected_entry_id?;
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Chip label for an upload flag
pub fn status_label(uploaded: bool) -> &'static str {
    if uploaded {
        "Uploaded"
    } else {
        "Pending"
    }
}

/// `round(100 * uploaded / total)`, or 0 for an empty collection
///
/// Halves round up, so 1 of 8 (12.5%) reports 13.
pub fn completion_percentage(uploaded: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let uploaded = uploaded.min(total) as u64;
    let total = total as u64;
    ((200 * uploaded + total) / (2 * total)) as u8
}
