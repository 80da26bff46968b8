//! # Photo Journal Collection
//!
//! Client-side photo collection manager: holds the user's photos newest-first,
//! tracks detail-view selection and runs the (simulated) upload transition.
//!
//! The presentation layer owns a [`PhotoCollection`] (usually behind an `Arc`),
//! dispatches user intents to it and re-renders from [`PhotoCollection::snapshot`]
//! whenever a [`journal_common::events::CollectionEvent`] arrives.

pub mod entry;
pub mod manager;
pub mod preview;
pub mod snapshot;
pub mod source;
pub mod uploader;

pub use entry::PhotoEntry;
pub use manager::{PhotoCollection, UploadOutcome, UploadSkipped};
pub use preview::{PreviewHandle, PreviewRegistry};
pub use snapshot::{completion_percentage, status_label, CollectionSnapshot, EntryView};
pub use source::{accept_images, ImageSource};
pub use uploader::{SimulatedUploader, Uploader};
