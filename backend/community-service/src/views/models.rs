//! Serializable view-models built from stored rows

use super::format::{badge_class, cap_badge, calendar_date, date_time, excerpt, is_recent, time_ago, EXCERPT_CHARS};
use crate::models::{BoardPost, Comment, Member, NewsItem, NewsWithComments, Participant};
use crate::services::MemberGroup;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Shown when a news item has no author name
pub const DEFAULT_AUTHOR: &str = "Admin";

#[derive(Debug, Clone, Serialize)]
pub struct NewsCard {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub badge_label: String,
    pub badge_class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub date_label: String,
    pub time_ago: String,
    pub is_new: bool,
    pub carries_attendance: bool,
    pub image_url: Option<String>,
}

impl NewsCard {
    pub fn build(item: &NewsItem, comment_count: Option<u64>, now: DateTime<Utc>) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            excerpt: excerpt(&item.content, EXCERPT_CHARS),
            category: item.category.clone(),
            badge_label: item.badge_label().to_string(),
            badge_class: badge_class(item.badge_color.as_deref()),
            comment_count,
            view_count: item.view_count,
            created_at: item.created_at,
            date_label: calendar_date(item.created_at),
            time_ago: time_ago(item.created_at, now),
            is_new: is_recent(item.created_at, now),
            carries_attendance: item.carries_attendance(),
            image_url: item.image_url.clone(),
        }
    }

    pub fn with_comments(entry: &NewsWithComments, now: DateTime<Utc>) -> Self {
        Self::build(&entry.item, Some(entry.comment_count), now)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsDetailView {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub badge_label: String,
    pub badge_class: &'static str,
    pub author_name: String,
    pub date_label: String,
    pub view_count: i64,
    pub image_url: Option<String>,
    pub event_date: Option<String>,
    pub event_location: Option<String>,
    pub carries_attendance: bool,
}

impl From<&NewsItem> for NewsDetailView {
    fn from(item: &NewsItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            content: item.content.clone(),
            category: item.category.clone(),
            badge_label: item.badge_label().to_string(),
            badge_class: badge_class(item.badge_color.as_deref()),
            author_name: item
                .author_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            date_label: date_time(item.created_at),
            view_count: item.view_count,
            image_url: item.image_url.clone(),
            event_date: item.event_date.clone(),
            event_location: item.event_location.clone(),
            carries_attendance: item.carries_attendance(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardPostCard {
    pub id: Uuid,
    pub category: &'static str,
    pub category_label: &'static str,
    pub title: String,
    pub author_name: String,
    pub author_img: Option<String>,
    pub views: i64,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
    pub time_ago: String,
    pub is_new: bool,
}

impl BoardPostCard {
    pub fn build(post: &BoardPost, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id,
            category: post.category.as_str(),
            category_label: post.category.label(),
            title: post.title.clone(),
            author_name: post.author_name.clone(),
            author_img: post.author_img.clone(),
            views: post.views,
            comments: post.comments,
            created_at: post.created_at,
            time_ago: time_ago(post.created_at, now),
            is_new: is_recent(post.created_at, now),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub date_label: String,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            parent_id: comment.parent_id,
            author_name: comment.author_name.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            date_label: date_time(comment.created_at),
        }
    }
}

/// Newest top-level comments of an item plus the total, for the collapsed list
#[derive(Debug, Clone, Serialize)]
pub struct CommentPreviewView {
    pub news_id: Uuid,
    pub comments: Vec<CommentView>,
    pub shown: usize,
    pub total: u64,
    /// More comments exist than the preview shows
    pub has_more: bool,
}

impl CommentPreviewView {
    pub fn build(news_id: Uuid, comments: &[Comment], total: u64, preview_size: usize) -> Self {
        let comments: Vec<CommentView> = comments.iter().map(CommentView::from).collect();
        Self {
            news_id,
            shown: comments.len(),
            has_more: total > preview_size as u64,
            comments,
            total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantListView {
    pub event_id: Uuid,
    pub count: usize,
    pub members: Vec<String>,
}

impl ParticipantListView {
    pub fn build(event_id: Uuid, participants: &[Participant]) -> Self {
        Self {
            event_id,
            count: participants.len(),
            members: participants.iter().map(|p| p.member_name.clone()).collect(),
        }
    }
}

/// New-content badges for the floating panel
#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    pub since: DateTime<Utc>,
    pub new_board_posts: u64,
    pub new_news: u64,
    /// `None` hides the badge
    pub board_badge: Option<String>,
    pub news_badge: Option<String>,
    pub total_badge: Option<String>,
}

impl ActivityView {
    pub fn build(since: DateTime<Utc>, new_board_posts: u64, new_news: u64) -> Self {
        let badge = |count: u64| (count > 0).then(|| cap_badge(count));
        Self {
            since,
            new_board_posts,
            new_news,
            board_badge: badge(new_board_posts),
            news_badge: badge(new_news),
            total_badge: badge(new_board_posts + new_news),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub name: String,
    /// Hidden for plain members
    pub role_label: Option<String>,
    pub role_badge: Option<&'static str>,
    pub company: Option<String>,
    pub field: Option<String>,
    pub image: String,
    pub description: String,
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
        let role_badge = member.role.badge_class();
        Self {
            name: member.name.clone(),
            role_label: role_badge.map(|_| member.role.label().to_string()),
            role_badge,
            company: non_empty(&member.company),
            field: non_empty(&member.field),
            image: member.image.clone(),
            description: member.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberGroupView {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub count: usize,
    pub members: Vec<MemberView>,
}

impl MemberGroupView {
    pub fn build(group: &MemberGroup<'_>) -> Self {
        let category = group.category;
        Self {
            key: category.key(),
            title: category.title(),
            icon: category.icon(),
            color: category.color(),
            count: group.members.len(),
            members: group.members.iter().map(|&m| MemberView::from(m)).collect(),
        }
    }
}
