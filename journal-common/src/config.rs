//! Configuration loading
//!
//! Two small surfaces:
//! 1. **API port**: default and validation (the binary reads `PORT` via clap)
//! 2. **Collection tuning**: [`CollectionConfig`] with built-in defaults

use crate::{Error, Result};
use std::time::Duration;

/// Default HTTP port for the API stub
pub const DEFAULT_PORT: u16 = 3000;

/// Parse a port value, rejecting 0 and anything outside u16
pub fn parse_port(raw: &str) -> Result<u16> {
    let port: u16 = raw
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid port: {:?}", raw)))?;
    if port == 0 {
        return Err(Error::Config("Port must be non-zero".to_string()));
    }
    Ok(port)
}

/// Photo collection tuning
///
/// Built-in defaults via `Default`; override fields with struct update syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionConfig {
    /// Simulated upload latency in milliseconds
    pub upload_latency_ms: u64,

    /// Total held image bytes above which a warning is logged
    ///
    /// Nothing is evicted; this only surfaces unbounded accumulation.
    pub soft_memory_limit_bytes: u64,

    /// Change events buffered per subscriber before old ones are dropped
    ///
    /// Values below 1 are treated as 1.
    pub event_capacity: usize,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            upload_latency_ms: 2000,
            soft_memory_limit_bytes: 256 * 1024 * 1024,
            event_capacity: 100,
        }
    }
}

impl CollectionConfig {
    /// Simulated upload latency as a Duration
    pub fn upload_latency(&self) -> Duration {
        crate::time::millis_to_duration(self.upload_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_valid() {
        assert_eq!(parse_port("8080").unwrap(), 8080);
        assert_eq!(parse_port(" 3001 ").unwrap(), 3001);
    }

    #[test]
    fn test_parse_port_rejects_zero_and_garbage() {
        assert!(matches!(parse_port("0"), Err(Error::Config(_))));
        assert!(matches!(parse_port("abc"), Err(Error::Config(_))));
        assert!(matches!(parse_port("70000"), Err(Error::Config(_))));
    }

    #[test]
    fn test_collection_config_defaults() {
        let config = CollectionConfig::default();
        assert_eq!(config.upload_latency_ms, 2000);
        assert_eq!(config.upload_latency(), Duration::from_secs(2));
        assert_eq!(config.event_capacity, 100);
    }
}
