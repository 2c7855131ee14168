//! Handle construction for the readiness coordinator

use crate::client::RemoteStore;
use crate::config::RemoteStoreConfig;
use async_trait::async_trait;
use resilience::{with_timeout, HandleFactory};
use std::time::Duration;
use tracing::debug;

/// Builds a [`RemoteStore`] and proves the endpoint answers before handing it out.
///
/// An unreachable or 5xx endpoint means "not available yet"; a rejected key or a
/// malformed configuration is a construction error.
pub struct RemoteStoreFactory {
    config: RemoteStoreConfig,
    probe_timeout: Duration,
}

impl RemoteStoreFactory {
    pub fn new(config: RemoteStoreConfig) -> Self {
        Self {
            config,
            probe_timeout: Duration::from_secs(2),
        }
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }
}

#[async_trait]
impl HandleFactory for RemoteStoreFactory {
    type Handle = RemoteStore;

    async fn build(&self) -> anyhow::Result<Option<RemoteStore>> {
        let store = RemoteStore::new(&self.config)?;

        match with_timeout(self.probe_timeout, store.probe()).await {
            Ok(Ok(())) => Ok(Some(store)),
            Ok(Err(e)) if e.is_unavailable() => {
                debug!(error = %e, "Remote store not reachable yet");
                Ok(None)
            }
            Ok(Err(e)) => Err(e.into()),
            Err(elapsed) => {
                debug!(error = %elapsed, "Remote store probe timed out");
                Ok(None)
            }
        }
    }
}
