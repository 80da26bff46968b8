//! HTTP API handlers for journal-api

pub mod health;
pub mod root;

pub use health::health_check;
pub use root::root_info;
