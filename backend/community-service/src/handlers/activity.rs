use crate::error::Result;
use crate::services::ActivityService;
use crate::state::AppState;
use crate::views::ActivityView;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// RFC 3339 timestamp of the client's last visit
    pub since: Option<DateTime<Utc>>,
}

/// New-content counts for the floating panel badges
pub async fn get_activity(
    state: web::Data<AppState>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse> {
    let service = ActivityService::new(state.store().await?);
    let counts = service.new_content(query.since, Utc::now()).await?;

    Ok(HttpResponse::Ok().json(ActivityView::build(counts.since, counts.board, counts.news)))
}
