use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A row of `event_participants`; `(event_id, member_name)` is unique remotely
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    pub event_id: Uuid,
    pub member_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AttendanceRequest {
    #[validate(length(min = 1, max = 50))]
    pub member_name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewParticipantRow<'a> {
    pub event_id: Uuid,
    pub member_name: &'a str,
}
