//! Event attendance - roster members registering for event and notice items

use super::members::MemberDirectory;
use super::tables;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::news::carries_attendance;
use crate::models::participant::NewParticipantRow;
use crate::models::{NewsItem, Participant};
use remote_store::{Order, RemoteStore};
use std::sync::Arc;
use uuid::Uuid;

pub struct AttendanceService {
    store: RemoteStore,
    directory: Arc<MemberDirectory>,
}

impl AttendanceService {
    pub fn new(store: RemoteStore, directory: Arc<MemberDirectory>) -> Self {
        Self { store, directory }
    }

    pub async fn count(&self, event_id: Uuid) -> Result<u64> {
        let count = self
            .store
            .from(tables::EVENT_PARTICIPANTS)
            .eq("event_id", event_id)
            .count()
            .await?;

        Ok(count)
    }

    /// Participants in registration order
    pub async fn list(&self, event_id: Uuid) -> Result<Vec<Participant>> {
        let participants = self
            .store
            .from(tables::EVENT_PARTICIPANTS)
            .eq("event_id", event_id)
            .order("created_at", Order::Ascending)
            .fetch()
            .await?;

        Ok(participants)
    }

    /// Register `member_name` for an event.
    ///
    /// A second registration of the same member is rejected remotely by the
    /// `(event_id, member_name)` unique key and surfaces as
    /// [`AppError::DuplicateEntry`]; nothing else is written in that case.
    pub async fn add(&self, event_id: Uuid, member_name: &str) -> Result<Participant> {
        let member_name = member_name.trim();
        if !self.directory.contains(member_name) {
            return Err(AppError::Validation(format!(
                "'{}' is not on the member roster",
                member_name
            )));
        }
        self.ensure_event(event_id).await?;

        let row = NewParticipantRow {
            event_id,
            member_name,
        };

        let inserted: Vec<Participant> = match self
            .store
            .from(tables::EVENT_PARTICIPANTS)
            .insert(&[row])
            .await
        {
            Ok(rows) => rows,
            Err(e) if e.is_duplicate() => {
                tracing::info!(event_id = %event_id, member = member_name, "Member already attending");
                metrics::record_attendance("duplicate");
                return Err(AppError::DuplicateEntry(format!(
                    "{} is already attending",
                    member_name
                )));
            }
            Err(e) => {
                metrics::record_attendance("error");
                return Err(e.into());
            }
        };

        let participant = super::news::first_row(inserted, "participant insert")?;
        metrics::record_attendance("added");
        tracing::info!(event_id = %event_id, member = member_name, "Attendance registered");
        Ok(participant)
    }

    /// Withdraw a registration
    pub async fn remove(&self, event_id: Uuid, member_name: &str) -> Result<()> {
        let member_name = member_name.trim();
        let removed: Vec<Participant> = self
            .store
            .from(tables::EVENT_PARTICIPANTS)
            .eq("event_id", event_id)
            .eq("member_name", member_name)
            .delete()
            .await?;

        if removed.is_empty() {
            return Err(AppError::NotFound(format!(
                "{} is not attending event {}",
                member_name, event_id
            )));
        }

        metrics::record_attendance("removed");
        tracing::info!(event_id = %event_id, member = member_name, "Attendance withdrawn");
        Ok(())
    }

    async fn ensure_event(&self, event_id: Uuid) -> Result<()> {
        let item: NewsItem = self
            .store
            .from(tables::NEWS)
            .eq("id", event_id)
            .fetch_optional()
            .await?
            .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;

        if !carries_attendance(&item.category) {
            return Err(AppError::Validation(format!(
                "'{}' items do not take attendance",
                item.category
            )));
        }
        Ok(())
    }
}
