//! Comment service - top-level comments on news items and one level of replies

use super::news::first_row;
use super::tables;
use crate::error::{AppError, Result};
use crate::models::comment::NewCommentRow;
use crate::models::required_text;
use crate::models::{Comment, CommentDraft};
use remote_store::{Order, RemoteStore};
use uuid::Uuid;

/// Newest top-level comments plus the total count
#[derive(Debug, Clone)]
pub struct CommentPreview {
    pub comments: Vec<Comment>,
    pub total: u64,
}

pub struct CommentService {
    store: RemoteStore,
}

impl CommentService {
    pub fn new(store: RemoteStore) -> Self {
        Self { store }
    }

    /// Get the newest `limit` top-level comments of a news item and the total
    pub async fn recent(&self, news_id: Uuid, limit: usize) -> Result<CommentPreview> {
        let comments = self
            .store
            .from(tables::COMMENTS)
            .eq("news_id", news_id)
            .is_null("parent_id")
            .order("created_at", Order::Descending)
            .limit(limit)
            .fetch()
            .await?;

        let total = self.count(news_id).await?;

        Ok(CommentPreview { comments, total })
    }

    /// Get every top-level comment of a news item, newest first
    pub async fn all(&self, news_id: Uuid) -> Result<Vec<Comment>> {
        let comments = self
            .store
            .from(tables::COMMENTS)
            .eq("news_id", news_id)
            .is_null("parent_id")
            .order("created_at", Order::Descending)
            .fetch()
            .await?;

        Ok(comments)
    }

    /// Get replies to a comment, oldest first
    pub async fn replies(&self, parent_id: Uuid) -> Result<Vec<Comment>> {
        let replies = self
            .store
            .from(tables::COMMENTS)
            .eq("parent_id", parent_id)
            .order("created_at", Order::Ascending)
            .fetch()
            .await?;

        Ok(replies)
    }

    /// Count top-level comments of a news item
    pub async fn count(&self, news_id: Uuid) -> Result<u64> {
        let count = self
            .store
            .from(tables::COMMENTS)
            .eq("news_id", news_id)
            .is_null("parent_id")
            .count()
            .await?;

        Ok(count)
    }

    /// Create a top-level comment
    pub async fn create(&self, news_id: Uuid, draft: &CommentDraft) -> Result<Comment> {
        self.insert(news_id, None, draft).await
    }

    /// Reply to a top-level comment
    pub async fn reply(&self, parent_id: Uuid, draft: &CommentDraft) -> Result<Comment> {
        let parent: Comment = self
            .store
            .from(tables::COMMENTS)
            .eq("id", parent_id)
            .fetch_optional()
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {}", parent_id)))?;

        if !parent.is_top_level() {
            return Err(AppError::Validation(
                "replies can only be added to top-level comments".to_string(),
            ));
        }

        self.insert(parent.news_id, Some(parent.id), draft).await
    }

    async fn insert(
        &self,
        news_id: Uuid,
        parent_id: Option<Uuid>,
        draft: &CommentDraft,
    ) -> Result<Comment> {
        let row = NewCommentRow {
            news_id,
            parent_id,
            author_name: required_text("author_name", &draft.author_name)?,
            content: required_text("content", &draft.content)?,
        };

        let inserted: Vec<Comment> = self.store.from(tables::COMMENTS).insert(&[row]).await?;
        let comment = first_row(inserted, "comment insert")?;

        tracing::info!(
            news_id = %news_id,
            comment_id = %comment.id,
            reply = parent_id.is_some(),
            "Comment created"
        );
        Ok(comment)
    }
}
