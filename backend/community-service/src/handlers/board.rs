//! Board handlers - anonymous posts

use crate::error::{AppError, Result};
use crate::models::{BoardCategory, BoardDraft, BoardUpdate, Credential};
use crate::services::BoardService;
use crate::state::AppState;
use crate::views::BoardPostCard;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct BoardListQuery {
    /// A category key; absent, empty or `all` lists every category
    pub category: Option<String>,
}

impl BoardListQuery {
    pub fn category(&self) -> Result<Option<BoardCategory>> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(AppError::Validation),
        }
    }
}

pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<BoardListQuery>,
) -> Result<HttpResponse> {
    let category = query.category()?;

    let service = BoardService::new(state.store().await?);
    let posts = service
        .filter_by_category(
            category,
            state.site.board_fetch_limit,
            state.site.board_display_limit,
        )
        .await?;

    let now = Utc::now();
    let cards: Vec<BoardPostCard> = posts.iter().map(|p| BoardPostCard::build(p, now)).collect();

    Ok(HttpResponse::Ok().json(cards))
}

pub async fn create_post(
    state: web::Data<AppState>,
    req: web::Json<BoardDraft>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = BoardService::new(state.store().await?);
    let post = service.create(&req).await?;

    Ok(HttpResponse::Created().json(post))
}

pub async fn update_post(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<BoardUpdate>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = BoardService::new(state.store().await?);
    let post = service.update(*id, &req).await?;

    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<Credential>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = BoardService::new(state.store().await?);
    service.delete(*id, &req.password).await?;

    Ok(HttpResponse::NoContent().finish())
}
