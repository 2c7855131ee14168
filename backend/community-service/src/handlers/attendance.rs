//! Attendance handlers - registrations for event and notice items

use crate::error::Result;
use crate::models::AttendanceRequest;
use crate::services::AttendanceService;
use crate::state::AppState;
use crate::views::ParticipantListView;
use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

fn service(state: &AppState, store: remote_store::RemoteStore) -> AttendanceService {
    AttendanceService::new(store, state.directory.clone())
}

/// Participants in registration order, with the count
pub async fn list_participants(
    state: web::Data<AppState>,
    event_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = service(&state, state.store().await?);
    let participants = service.list(*event_id).await?;

    Ok(HttpResponse::Ok().json(ParticipantListView::build(*event_id, &participants)))
}

pub async fn add_participant(
    state: web::Data<AppState>,
    event_id: web::Path<Uuid>,
    req: web::Json<AttendanceRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = service(&state, state.store().await?);
    let participant = service.add(*event_id, &req.member_name).await?;

    Ok(HttpResponse::Created().json(participant))
}

pub async fn remove_participant(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse> {
    let (event_id, member_name) = path.into_inner();

    let service = service(&state, state.store().await?);
    service.remove(event_id, &member_name).await?;

    Ok(HttpResponse::NoContent().finish())
}
