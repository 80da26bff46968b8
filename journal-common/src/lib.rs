//! # Photo Journal Common Library
//!
//! Shared code for the photo journal crates including:
//! - Error and result types
//! - Configuration loading (port resolution, collection tuning)
//! - Change events (CollectionEvent enum) and the EventBus
//! - Timestamp and identifier helpers

pub mod config;
pub mod error;
pub mod events;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
