//! Image sources handed over by file selection or drag/drop
//!
//! The allow-list lives here, on the selection side. The collection manager
//! itself accepts whatever it is given.

use journal_common::Result;
use std::path::Path;
use tracing::{debug, warn};

/// Extensions accepted by the picker and the drop zone
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "webp"];

/// One raw image as delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// File name as shown to the user (no directory)
    pub name: String,
    /// MIME type, sniffed from content or derived from the extension
    pub media_type: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl ImageSource {
    /// Build a source from a name and raw bytes, detecting the media type
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = detect_media_type(&name, &bytes);
        Self { name, media_type, bytes }
    }

    /// Read a file from disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Read {} ({} bytes)", name, bytes.len());
        Ok(Self::new(name, bytes))
    }

    /// Lowercased extension of `name`, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }

    /// True when the extension is allow-listed and the content is an image
    pub fn is_accepted(&self) -> bool {
        let ext_ok = self
            .extension()
            .map(|e| ACCEPTED_EXTENSIONS.contains(&e.as_str()))
            .unwrap_or(false);
        ext_ok && self.media_type.starts_with("image/")
    }
}

/// Keep the accepted sources (in order), logging the rejected ones
pub fn accept_images(sources: Vec<ImageSource>) -> Vec<ImageSource> {
    sources
        .into_iter()
        .filter(|source| {
            let accepted = source.is_accepted();
            if !accepted {
                warn!(
                    "Rejected {} ({}): not an accepted image format",
                    source.name, source.media_type
                );
            }
            accepted
        })
        .collect()
}

fn detect_media_type(name: &str, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string()
}
