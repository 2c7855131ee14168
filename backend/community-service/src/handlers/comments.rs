//! Comment handlers - comments on news items and replies

use crate::error::Result;
use crate::models::CommentDraft;
use crate::services::CommentService;
use crate::state::AppState;
use crate::views::{CommentPreviewView, CommentView};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Upper bound for `?limit=`
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub limit: Option<usize>,
    #[serde(default)]
    pub all: bool,
}

/// Newest top-level comments with the total, or every top-level comment with `?all=true`
pub async fn list_comments(
    state: web::Data<AppState>,
    news_id: web::Path<Uuid>,
    query: web::Query<CommentListQuery>,
) -> Result<HttpResponse> {
    let service = CommentService::new(state.store().await?);
    let news_id = news_id.into_inner();

    if query.all {
        let comments: Vec<CommentView> = service
            .all(news_id)
            .await?
            .iter()
            .map(CommentView::from)
            .collect();
        return Ok(HttpResponse::Ok().json(comments));
    }

    let limit = query
        .limit
        .unwrap_or(state.site.comment_preview)
        .clamp(1, MAX_LIMIT);
    let preview = service.recent(news_id, limit).await?;

    Ok(HttpResponse::Ok().json(CommentPreviewView::build(
        news_id,
        &preview.comments,
        preview.total,
        limit,
    )))
}

pub async fn create_comment(
    state: web::Data<AppState>,
    news_id: web::Path<Uuid>,
    req: web::Json<CommentDraft>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new(state.store().await?);
    let comment = service.create(*news_id, &req).await?;

    Ok(HttpResponse::Created().json(CommentView::from(&comment)))
}

/// Replies to a comment, oldest first
pub async fn list_replies(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = CommentService::new(state.store().await?);
    let replies: Vec<CommentView> = service
        .replies(*comment_id)
        .await?
        .iter()
        .map(CommentView::from)
        .collect();

    Ok(HttpResponse::Ok().json(replies))
}

pub async fn create_reply(
    state: web::Data<AppState>,
    comment_id: web::Path<Uuid>,
    req: web::Json<CommentDraft>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new(state.store().await?);
    let reply = service.reply(*comment_id, &req).await?;

    Ok(HttpResponse::Created().json(CommentView::from(&reply)))
}
