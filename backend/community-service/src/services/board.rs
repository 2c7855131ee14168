//! Board service - anonymous posts for the floating board panel

use super::news::first_row;
use super::tables;
use crate::error::{AppError, Result};
use crate::models::board::{BoardPatch, NewBoardRow};
use crate::models::required_text;
use crate::models::{BoardCategory, BoardDraft, BoardPost, BoardUpdate};
use crate::security::{credential_hash, verify_credential};
use chrono::Utc;
use remote_store::{Order, RemoteStore};
use uuid::Uuid;

pub struct BoardService {
    store: RemoteStore,
}

impl BoardService {
    pub fn new(store: RemoteStore) -> Self {
        Self { store }
    }

    /// Newest posts across all categories
    pub async fn latest(&self, limit: usize) -> Result<Vec<BoardPost>> {
        let posts = self
            .store
            .from(tables::BOARD_POSTS)
            .order("created_at", Order::Descending)
            .limit(limit)
            .fetch()
            .await?;

        Ok(posts)
    }

    /// Newest `fetch_limit` posts, narrowed to `category` and cut to `display_limit`
    pub async fn filter_by_category(
        &self,
        category: Option<BoardCategory>,
        fetch_limit: usize,
        display_limit: usize,
    ) -> Result<Vec<BoardPost>> {
        let posts = self.latest(fetch_limit).await?;
        Ok(filter_posts(posts, category, display_limit))
    }

    pub async fn create(&self, draft: &BoardDraft) -> Result<BoardPost> {
        let row = NewBoardRow {
            category: draft.category,
            title: required_text("title", &draft.title)?,
            content: required_text("content", &draft.content)?,
            author_name: required_text("author_name", &draft.author_name)?,
            author_img: draft.author_img.as_deref(),
            password_hash: credential_hash(&draft.password)?,
        };

        let inserted: Vec<BoardPost> = self.store.from(tables::BOARD_POSTS).insert(&[row]).await?;
        let post = first_row(inserted, "board insert")?;

        tracing::info!(post_id = %post.id, category = %post.category, "Board post created");
        Ok(post)
    }

    pub async fn update(&self, id: Uuid, update: &BoardUpdate) -> Result<BoardPost> {
        let patch = BoardPatch::from_update(update, Utc::now())?;
        self.authorize(id, &update.password).await?;

        let updated: Vec<BoardPost> = self
            .store
            .from(tables::BOARD_POSTS)
            .eq("id", id)
            .update(&patch)
            .await?;

        first_row(updated, "board update")
    }

    pub async fn delete(&self, id: Uuid, password: &str) -> Result<()> {
        self.authorize(id, password).await?;

        let _: Vec<serde_json::Value> = self
            .store
            .from(tables::BOARD_POSTS)
            .eq("id", id)
            .delete()
            .await?;

        tracing::info!(post_id = %id, "Board post deleted");
        Ok(())
    }

    async fn authorize(&self, id: Uuid, password: &str) -> Result<()> {
        let post: BoardPost = self
            .store
            .from(tables::BOARD_POSTS)
            .eq("id", id)
            .fetch_optional()
            .await?
            .ok_or_else(|| AppError::NotFound(format!("board post {}", id)))?;

        verify_credential(post.password_hash.as_deref(), password)
    }
}

fn filter_posts(
    posts: Vec<BoardPost>,
    category: Option<BoardCategory>,
    display_limit: usize,
) -> Vec<BoardPost> {
    posts
        .into_iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .take(display_limit)
        .collect()
}
