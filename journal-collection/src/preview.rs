//! Revocable preview references
//!
//! A [`PreviewHandle`] is acquired from the [`PreviewRegistry`] when an entry
//! is created and revoked when the handle is dropped. The registry is what
//! the presentation layer resolves `blob:` URIs against; a URI that is no
//! longer registered must not be rendered.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;
use uuid::Uuid;

const URI_PREFIX: &str = "blob:photo-journal/";

/// Set of currently live preview URIs
///
/// Cheap to clone; clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<String>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh preview URI for `entry_id`
    pub fn acquire(&self, entry_id: Uuid) -> PreviewHandle {
        let uri = format!("{}{}", URI_PREFIX, entry_id);
        self.guard().insert(uri.clone());
        trace!("Preview acquired: {}", uri);
        PreviewHandle {
            uri,
            registry: self.clone(),
        }
    }

    /// True while the URI is registered
    pub fn is_live(&self, uri: &str) -> bool {
        self.guard().contains(uri)
    }

    /// Number of live preview URIs
    pub fn live_count(&self) -> usize {
        self.guard().len()
    }

    fn revoke(&self, uri: &str) {
        if self.guard().remove(uri) {
            trace!("Preview revoked: {}", uri);
        }
    }

    // A panic elsewhere cannot leave the set half-updated, so poisoning is ignored
    fn guard(&self) -> MutexGuard<'_, HashSet<String>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped preview reference; revoked on drop
#[derive(Debug)]
pub struct PreviewHandle {
    uri: String,
    registry: PreviewRegistry,
}

impl PreviewHandle {
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.revoke(&self.uri);
    }
}
