//! Data models for community-service
//!
//! Rows here mirror the remote tables (`news`, `board_posts`, `comments`,
//! `event_participants`). Members come from a local roster instead.
//!
//! Password digests are read from rows but never serialized back out.

pub mod board;
pub mod comment;
pub mod member;
pub mod news;
pub mod participant;

pub use board::{BoardCategory, BoardDraft, BoardPost, BoardUpdate};
pub use comment::{Comment, CommentDraft};
pub use member::{Member, MemberCategory, MemberRole};
pub use news::{NewsDraft, NewsItem, NewsUpdate, NewsWithComments};
pub use participant::{AttendanceRequest, Participant};

use crate::error::{AppError, Result};
use serde::Deserialize;
use validator::Validate;

/// Password presented to delete an anonymous post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Credential {
    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

/// Trim `value` and reject it when nothing is left
pub(crate) fn required_text<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} must not be blank", field)));
    }
    Ok(trimmed)
}

/// [`required_text`] for fields a patch may leave out
pub(crate) fn optional_text<'a>(field: &str, value: Option<&'a str>) -> Result<Option<&'a str>> {
    value.map(|v| required_text(field, v)).transpose()
}
