//! Shared application state handed to every handler

use crate::config::SiteConfig;
use crate::error::Result;
use crate::services::MemberDirectory;
use remote_store::{RemoteStore, RemoteStoreFactory};
use resilience::ReadinessCoordinator;
use std::sync::Arc;
use std::time::Duration;

pub type StoreCoordinator = ReadinessCoordinator<RemoteStoreFactory>;

#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<StoreCoordinator>,
    /// Per-request wait for the remote handle
    pub wait_timeout: Duration,
    pub site: SiteConfig,
    pub directory: Arc<MemberDirectory>,
}

impl AppState {
    pub fn new(
        coordinator: Arc<StoreCoordinator>,
        wait_timeout: Duration,
        site: SiteConfig,
        directory: MemberDirectory,
    ) -> Self {
        Self {
            coordinator,
            wait_timeout,
            site,
            directory: Arc::new(directory),
        }
    }

    /// Resolve the remote handle, waiting at most `wait_timeout`
    pub async fn store(&self) -> Result<RemoteStore> {
        Ok(self.coordinator.wait_until_ready(self.wait_timeout).await?)
    }
}
