use crate::state::AppState;
use crate::views::MemberGroupView;
use actix_web::{web, HttpResponse};

/// Member directory grouped by category. Served from the local roster.
pub async fn list_members(state: web::Data<AppState>) -> HttpResponse {
    let groups: Vec<MemberGroupView> = state
        .directory
        .grouped()
        .iter()
        .map(MemberGroupView::build)
        .collect();

    HttpResponse::Ok().json(groups)
}
