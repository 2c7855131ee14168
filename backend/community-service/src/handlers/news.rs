//! News handlers - HTTP endpoints for news items

use crate::error::Result;
use crate::models::{Credential, NewsDraft, NewsUpdate};
use crate::services::NewsService;
use crate::state::AppState;
use crate::views::{NewsCard, NewsDetailView};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

/// Published news, newest first, with comment counts
pub async fn list_news(state: web::Data<AppState>) -> Result<HttpResponse> {
    let service = NewsService::new(state.store().await?);
    let now = Utc::now();

    let cards: Vec<NewsCard> = service
        .list_published()
        .await?
        .iter()
        .map(|entry| NewsCard::with_comments(entry, now))
        .collect();

    Ok(HttpResponse::Ok().json(cards))
}

/// Newest items for the floating panel
pub async fn latest_news(state: web::Data<AppState>) -> Result<HttpResponse> {
    let service = NewsService::new(state.store().await?);
    let now = Utc::now();

    let cards: Vec<NewsCard> = service
        .panel(state.site.news_fetch_limit, state.site.news_display_limit)
        .await?
        .iter()
        .map(|item| NewsCard::build(item, None, now))
        .collect();

    Ok(HttpResponse::Ok().json(cards))
}

/// Get a news item; counts as a view
pub async fn get_news(state: web::Data<AppState>, id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = NewsService::new(state.store().await?);
    let item = service.detail(*id).await?;

    Ok(HttpResponse::Ok().json(NewsDetailView::from(&item)))
}

pub async fn create_news(
    state: web::Data<AppState>,
    req: web::Json<NewsDraft>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = NewsService::new(state.store().await?);
    let item = service.create(&req).await?;

    Ok(HttpResponse::Created().json(item))
}

pub async fn update_news(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<NewsUpdate>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = NewsService::new(state.store().await?);
    let item = service.update(*id, &req).await?;

    Ok(HttpResponse::Ok().json(item))
}

pub async fn delete_news(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    req: web::Json<Credential>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = NewsService::new(state.store().await?);
    service.delete(*id, &req.password).await?;

    Ok(HttpResponse::NoContent().finish())
}
