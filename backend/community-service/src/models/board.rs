use chrono::{DateTime, Utc};
use super::optional_text;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Board post categories. Unknown values read back from storage become `Etc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BoardCategory {
    Request,
    Info,
    Share,
    Etc,
}

impl BoardCategory {
    pub const ALL: [BoardCategory; 4] = [
        BoardCategory::Request,
        BoardCategory::Info,
        BoardCategory::Share,
        BoardCategory::Etc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BoardCategory::Request => "request",
            BoardCategory::Info => "info",
            BoardCategory::Share => "share",
            BoardCategory::Etc => "etc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BoardCategory::Request => "Request",
            BoardCategory::Info => "Info",
            BoardCategory::Share => "Share",
            BoardCategory::Etc => "Other",
        }
    }
}

impl From<String> for BoardCategory {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(BoardCategory::Etc)
    }
}

impl FromStr for BoardCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "request" => Ok(BoardCategory::Request),
            "info" => Ok(BoardCategory::Info),
            "share" => Ok(BoardCategory::Share),
            "etc" => Ok(BoardCategory::Etc),
            other => Err(format!("unknown board category '{}'", other)),
        }
    }
}

impl fmt::Display for BoardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request bodies name a known category or are rejected
fn strict_category<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BoardCategory, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn strict_optional_category<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<BoardCategory>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| raw.parse().map_err(serde::de::Error::custom))
        .transpose()
}

/// A row of the `board_posts` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardPost {
    pub id: Uuid,
    pub category: BoardCategory,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub author_name: String,
    #[serde(default)]
    pub author_img: Option<String>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub comments: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub password_hash: Option<String>,
}

/// Request body for a new board post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BoardDraft {
    #[serde(deserialize_with = "strict_category")]
    pub category: BoardCategory,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
    #[validate(length(min = 1, max = 50))]
    pub author_name: String,
    #[validate(url)]
    pub author_img: Option<String>,
    #[validate(length(min = 4, max = 100))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewBoardRow<'a> {
    pub category: BoardCategory,
    pub title: &'a str,
    pub content: &'a str,
    pub author_name: &'a str,
    pub author_img: Option<&'a str>,
    pub password_hash: String,
}

/// Request body for editing a board post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BoardUpdate {
    #[validate(length(min = 1, max = 100))]
    pub password: String,
    #[serde(default, deserialize_with = "strict_optional_category")]
    pub category: Option<BoardCategory>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BoardPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<BoardCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> BoardPatch<'a> {
    /// Text fields present in the update are trimmed and must not be blank
    pub fn from_update(update: &'a BoardUpdate, now: DateTime<Utc>) -> crate::error::Result<Self> {
        Ok(Self {
            category: update.category,
            title: optional_text("title", update.title.as_deref())?,
            content: optional_text("content", update.content.as_deref())?,
            updated_at: now,
        })
    }
}
