use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A row of the `comments` table. Replies point at a top-level comment
/// through `parent_id`; there is only one level of nesting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub news_id: Uuid,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Request body for a comment or a reply
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentDraft {
    #[validate(length(min = 1, max = 50))]
    pub author_name: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewCommentRow<'a> {
    pub news_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub author_name: &'a str,
    pub content: &'a str,
}
