//! Upload seam
//!
//! The manager only knows that an upload takes some time and then succeeds.
//! [`SimulatedUploader`] fakes that with a fixed delay; a network-backed
//! implementation can replace it without touching the manager.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Transfers a batch of entries somewhere
///
/// Implementations must eventually return; there is no cancellation path.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload the entries identified by `entry_ids`
    async fn upload(&self, entry_ids: &[Uuid]);
}

/// Always-successful uploader that just waits
#[derive(Debug, Clone)]
pub struct SimulatedUploader {
    latency: Duration,
}

impl SimulatedUploader {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Uploader for SimulatedUploader {
    async fn upload(&self, entry_ids: &[Uuid]) {
        debug!(
            "Simulating upload of {} entries ({} ms)",
            entry_ids.len(),
            self.latency.as_millis()
        );
        tokio::time::sleep(self.latency).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_simulated_upload_waits_for_latency() {
        let uploader = SimulatedUploader::new(Duration::from_millis(30));
        let start = Instant::now();

        uploader.upload(&[Uuid::new_v4()]).await;

        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_simulated_upload_zero_latency_returns() {
        let uploader = SimulatedUploader::new(Duration::ZERO);
        let finished = tokio::time::timeout(Duration::from_secs(1), uploader.upload(&[])).await;
        assert!(finished.is_ok());
    }
}
