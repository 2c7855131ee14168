//! HTML fragment endpoints for the static pages
//!
//! Failures render an escaped error panel with the error's status code
//! instead of a JSON body.

use super::board::BoardListQuery;
use crate::error::{AppError, Result};
use crate::services::{AttendanceService, BoardService, CommentService, NewsService};
use crate::state::AppState;
use crate::views::fragments;
use crate::views::{BoardPostCard, CommentPreviewView, MemberGroupView, NewsCard, ParticipantListView};
use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use uuid::Uuid;

fn render(result: Result<String>) -> HttpResponse {
    match result {
        Ok(html) => HttpResponse::Ok().content_type(ContentType::html()).body(html),
        Err(err) => {
            err.report();
            HttpResponse::build(err.status_code())
                .content_type(ContentType::html())
                .body(fragments::error_panel(&err))
        }
    }
}

pub async fn news(state: web::Data<AppState>) -> HttpResponse {
    render(news_html(&state).await)
}

async fn news_html(state: &AppState) -> Result<String> {
    let service = NewsService::new(state.store().await?);
    let now = Utc::now();
    let cards: Vec<NewsCard> = service
        .list_published()
        .await?
        .iter()
        .map(|entry| NewsCard::with_comments(entry, now))
        .collect();

    Ok(fragments::news_list(&cards))
}

pub async fn latest_news(state: web::Data<AppState>) -> HttpResponse {
    render(latest_news_html(&state).await)
}

async fn latest_news_html(state: &AppState) -> Result<String> {
    let service = NewsService::new(state.store().await?);
    let now = Utc::now();
    let cards: Vec<NewsCard> = service
        .panel(state.site.news_fetch_limit, state.site.news_display_limit)
        .await?
        .iter()
        .map(|item| NewsCard::build(item, None, now))
        .collect();

    Ok(fragments::news_panel(&cards))
}

pub async fn comments(state: web::Data<AppState>, news_id: web::Path<Uuid>) -> HttpResponse {
    render(comments_html(&state, *news_id).await)
}

async fn comments_html(state: &AppState, news_id: Uuid) -> Result<String> {
    let service = CommentService::new(state.store().await?);
    let preview_size = state.site.comment_preview;
    let preview = service.recent(news_id, preview_size).await?;

    let view = CommentPreviewView::build(news_id, &preview.comments, preview.total, preview_size);
    Ok(fragments::comment_list(&view))
}

pub async fn board(state: web::Data<AppState>, query: web::Query<BoardListQuery>) -> HttpResponse {
    render(board_html(&state, &query).await)
}

async fn board_html(state: &AppState, query: &BoardListQuery) -> Result<String> {
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
    Ok(fragments::board_list(&cards))
}

pub async fn participants(state: web::Data<AppState>, event_id: web::Path<Uuid>) -> HttpResponse {
    render(participants_html(&state, *event_id).await)
}

async fn participants_html(state: &AppState, event_id: Uuid) -> Result<String> {
    let service = AttendanceService::new(state.store().await?, state.directory.clone());
    let participants = service.list(event_id).await?;

    Ok(fragments::participant_list(&ParticipantListView::build(
        event_id,
        &participants,
    )))
}

pub async fn members(state: web::Data<AppState>) -> HttpResponse {
    let groups: Vec<MemberGroupView> = state
        .directory
        .grouped()
        .iter()
        .map(MemberGroupView::build)
        .collect();

    if groups.is_empty() {
        return render(Err(AppError::NotFound("member roster is empty".to_string())));
    }
    render(Ok(fragments::member_directory(&groups)))
}
