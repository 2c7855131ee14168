//! New-content counts for the floating panel badges

use super::tables;
use crate::error::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use remote_store::RemoteStore;

/// Window used when the client does not say when it last looked
pub const DEFAULT_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityCounts {
    pub since: DateTime<Utc>,
    pub board: u64,
    pub news: u64,
}

pub struct ActivityService {
    store: RemoteStore,
}

impl ActivityService {
    pub fn new(store: RemoteStore) -> Self {
        Self { store }
    }

    /// Board posts and published news created after `since`
    /// (default: the last 24 hours)
    pub async fn new_content(
        &self,
        since: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<ActivityCounts> {
        let since = window_start(since, now);
        let cutoff = since.to_rfc3339_opts(SecondsFormat::Secs, true);

        let board = self
            .store
            .from(tables::BOARD_POSTS)
            .gte("created_at", &cutoff)
            .count();
        let news = self
            .store
            .from(tables::NEWS)
            .eq("is_published", true)
            .gte("created_at", &cutoff)
            .count();

        let (board, news) = futures::try_join!(board, news)?;

        tracing::debug!(since = %cutoff, board, news, "Counted new content");
        Ok(ActivityCounts { since, board, news })
    }
}

/// Future timestamps are clamped to `now`
fn window_start(since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    match since {
        Some(since) => since.min(now),
        None => now - Duration::hours(DEFAULT_WINDOW_HOURS),
    }
}
