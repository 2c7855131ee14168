//! News service - published items, view counting, anonymous edits

use super::tables;
use crate::error::{AppError, Result};
use crate::models::news::{NewNewsRow, NewsPatch};
use crate::models::required_text;
use crate::models::{NewsDraft, NewsItem, NewsUpdate, NewsWithComments};
use crate::security::{credential_hash, verify_credential};
use crate::views::models::DEFAULT_AUTHOR;
use chrono::Utc;
use futures::future::try_join_all;
use remote_store::{Order, RemoteStore};
use serde_json::json;
use uuid::Uuid;

/// Server-side procedure bumping `news.view_count`
pub const INCREMENT_VIEW_COUNT: &str = "increment_view_count";

pub struct NewsService {
    store: RemoteStore,
}

impl NewsService {
    pub fn new(store: RemoteStore) -> Self {
        Self { store }
    }

    /// Published items, newest first, each with its top-level comment count
    pub async fn list_published(&self) -> Result<Vec<NewsWithComments>> {
        let items: Vec<NewsItem> = self
            .store
            .from(tables::NEWS)
            .eq("is_published", true)
            .order("created_at", Order::Descending)
            .fetch()
            .await?;

        let counts = try_join_all(items.iter().map(|item| self.comment_count(item.id))).await?;

        Ok(items
            .into_iter()
            .zip(counts)
            .map(|(item, comment_count)| NewsWithComments {
                item,
                comment_count,
            })
            .collect())
    }

    /// Newest published items
    pub async fn latest(&self, limit: usize) -> Result<Vec<NewsItem>> {
        let items = self
            .store
            .from(tables::NEWS)
            .eq("is_published", true)
            .order("created_at", Order::Descending)
            .limit(limit)
            .fetch()
            .await?;

        Ok(items)
    }

    /// Floating panel list: the newest `fetch_limit` items, at most `display_limit` shown
    pub async fn panel(&self, fetch_limit: usize, display_limit: usize) -> Result<Vec<NewsItem>> {
        let mut items = self.latest(fetch_limit).await?;
        items.truncate(display_limit);
        Ok(items)
    }

    /// Record a view, then fetch the item
    pub async fn detail(&self, id: Uuid) -> Result<NewsItem> {
        self.store
            .rpc_void(INCREMENT_VIEW_COUNT, &json!({ "news_id": id }))
            .await?;

        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("news {}", id)))
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<NewsItem>> {
        let item = self
            .store
            .from(tables::NEWS)
            .eq("id", id)
            .fetch_optional()
            .await?;

        Ok(item)
    }

    pub async fn create(&self, draft: &NewsDraft) -> Result<NewsItem> {
        let row = NewNewsRow {
            title: required_text("title", &draft.title)?,
            content: required_text("content", &draft.content)?,
            category: required_text("category", &draft.category)?,
            badge_text: draft.badge_text.as_deref(),
            badge_color: draft.badge_color.as_deref(),
            author_name: draft
                .author_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_AUTHOR),
            image_url: draft.image_url.as_deref(),
            event_date: draft.event_date.as_deref(),
            event_location: draft.event_location.as_deref(),
            is_published: draft.is_published.unwrap_or(true),
            password_hash: draft.password.as_deref().map(credential_hash).transpose()?,
        };

        let inserted: Vec<NewsItem> = self.store.from(tables::NEWS).insert(&[row]).await?;
        let item = first_row(inserted, "news insert")?;

        tracing::info!(news_id = %item.id, category = %item.category, "News item created");
        Ok(item)
    }

    pub async fn update(&self, id: Uuid, update: &NewsUpdate) -> Result<NewsItem> {
        let patch = NewsPatch::from_update(update, Utc::now())?;
        self.authorize(id, &update.password).await?;

        let updated: Vec<NewsItem> = self
            .store
            .from(tables::NEWS)
            .eq("id", id)
            .update(&patch)
            .await?;

        let item = first_row(updated, "news update")?;
        tracing::info!(news_id = %id, "News item updated");
        Ok(item)
    }

    pub async fn delete(&self, id: Uuid, password: &str) -> Result<()> {
        self.authorize(id, password).await?;

        let _: Vec<serde_json::Value> = self.store.from(tables::NEWS).eq("id", id).delete().await?;

        tracing::info!(news_id = %id, "News item deleted");
        Ok(())
    }

    async fn authorize(&self, id: Uuid, password: &str) -> Result<()> {
        let item = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("news {}", id)))?;

        verify_credential(item.password_hash.as_deref(), password).map_err(|e| {
            tracing::warn!(news_id = %id, "News credential mismatch");
            e
        })
    }

    async fn comment_count(&self, news_id: Uuid) -> Result<u64> {
        let count = self
            .store
            .from(tables::COMMENTS)
            .eq("news_id", news_id)
            .is_null("parent_id")
            .count()
            .await?;

        Ok(count)
    }
}

/// First row of a `return=representation` write
pub(crate) fn first_row<T>(rows: Vec<T>, operation: &str) -> Result<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| AppError::RemoteRequestFailed(format!("{} returned no rows", operation)))
}
