use super::optional_text;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Categories whose items take event attendance
pub const ATTENDANCE_CATEGORIES: [&str; 4] = ["event", "notice", "행사안내", "공지사항"];

pub fn carries_attendance(category: &str) -> bool {
    ATTENDANCE_CATEGORIES.contains(&category.trim())
}

/// A row of the `news` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub badge_text: Option<String>,
    #[serde(default)]
    pub badge_color: Option<String>,
    #[serde(default)]
    pub author_id: Option<Uuid>,
    #[serde(default)]
    pub author_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub event_location: Option<String>,
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
}

fn default_published() -> bool {
    true
}

impl NewsItem {
    pub fn carries_attendance(&self) -> bool {
        carries_attendance(&self.category)
    }

    /// Badge text, falling back to the category
    pub fn badge_label(&self) -> &str {
        self.badge_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.category)
    }
}

/// A published item together with its top-level comment count
#[derive(Debug, Clone)]
pub struct NewsWithComments {
    pub item: NewsItem,
    pub comment_count: u64,
}

/// Request body for creating a news item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewsDraft {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 20000))]
    pub content: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(max = 30))]
    pub badge_text: Option<String>,
    #[validate(length(max = 20))]
    pub badge_color: Option<String>,
    #[validate(length(max = 50))]
    pub author_name: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(max = 40))]
    pub event_date: Option<String>,
    #[validate(length(max = 200))]
    pub event_location: Option<String>,
    pub is_published: Option<bool>,
    /// Optional; items created without one cannot be edited anonymously
    #[validate(length(min = 4, max = 100))]
    pub password: Option<String>,
}

/// Insert payload for `news`
#[derive(Debug, Serialize)]
pub(crate) struct NewNewsRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub category: &'a str,
    pub badge_text: Option<&'a str>,
    pub badge_color: Option<&'a str>,
    pub author_name: &'a str,
    pub image_url: Option<&'a str>,
    pub event_date: Option<&'a str>,
    pub event_location: Option<&'a str>,
    pub is_published: bool,
    pub password_hash: Option<String>,
}

/// Request body for editing a news item; absent fields stay unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewsUpdate {
    #[validate(length(min = 1, max = 100))]
    pub password: String,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 20000))]
    pub content: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    #[validate(length(max = 30))]
    pub badge_text: Option<String>,
    #[validate(length(max = 20))]
    pub badge_color: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(length(max = 40))]
    pub event_date: Option<String>,
    #[validate(length(max = 200))]
    pub event_location: Option<String>,
    pub is_published: Option<bool>,
}

/// Patch payload for `news`
#[derive(Debug, Serialize)]
pub(crate) struct NewsPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_color: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NewsPatch<'a> {
    /// Text fields present in the update are trimmed and must not be blank
    pub fn from_update(update: &'a NewsUpdate, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            title: optional_text("title", update.title.as_deref())?,
            content: optional_text("content", update.content.as_deref())?,
            category: optional_text("category", update.category.as_deref())?,
            badge_text: update.badge_text.as_deref(),
            badge_color: update.badge_color.as_deref(),
            image_url: update.image_url.as_deref(),
            event_date: update.event_date.as_deref(),
            event_location: update.event_location.as_deref(),
            is_published: update.is_published,
            updated_at: now,
        })
    }
}
