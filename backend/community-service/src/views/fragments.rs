//! HTML fragments for the site's pages
//!
//! Each function renders a complete fragment from view-models. Fragments are
//! inserted client-side as-is, so everything goes through [`Markup`].

use super::html::{safe_url, Markup};
use super::models::{
    BoardPostCard, CommentPreviewView, MemberGroupView, NewsCard, ParticipantListView,
};
use crate::error::AppError;

/// Directory holding member portraits
const TEAM_IMAGE_DIR: &str = "assets/img/team/";

pub fn news_list(cards: &[NewsCard]) -> String {
    let mut m = Markup::new();

    if cards.is_empty() {
        m.elem("div", &[("class", "text-center py-5 text-body-secondary")], |m| {
            m.text_elem("p", &[("class", "fs-4")], "No news has been posted yet.");
        });
        return m.into_string();
    }

    for card in cards {
        let id = card.id.to_string();
        let badge = format!("badge {}", card.badge_class);
        let comments = card.comment_count.unwrap_or(0).to_string();
        let views = card.view_count.to_string();

        m.elem(
            "div",
            &[("class", "list-group-item border mb-3"), ("data-news-id", id.as_str())],
            |m| {
                if let Some(src) = card.image_url.as_deref().and_then(safe_url) {
                    m.void_elem(
                        "img",
                        &[("class", "img-fluid rounded mb-2"), ("src", src), ("alt", card.title.as_str())],
                    );
                }
                m.elem(
                    "div",
                    &[("class", "d-flex w-100 justify-content-between align-items-start mb-2")],
                    |m| {
                        m.text_elem("h5", &[("class", "mb-1 fw-bold")], &card.title);
                        m.text_elem("small", &[("class", "text-body-secondary")], &card.date_label);
                    },
                );
                m.text_elem("p", &[("class", "mb-2 text-body-secondary")], &card.excerpt);
                m.elem(
                    "div",
                    &[("class", "d-flex justify-content-between align-items-center")],
                    |m| {
                        m.elem("div", &[("class", "d-flex gap-2")], |m| {
                            m.text_elem("span", &[("class", badge.as_str())], &card.badge_label);
                            m.text_elem(
                                "span",
                                &[("class", "badge bg-secondary"), ("title", "Comments")],
                                &comments,
                            );
                            if card.is_new {
                                m.text_elem("span", &[("class", "badge bg-danger")], "NEW");
                            }
                        });
                        m.text_elem(
                            "small",
                            &[("class", "text-body-tertiary"), ("title", "Views")],
                            &views,
                        );
                    },
                );
            },
        );
    }

    m.into_string()
}

/// Compact list for the floating news panel
pub fn news_panel(cards: &[NewsCard]) -> String {
    let mut m = Markup::new();

    if cards.is_empty() {
        m.text_elem("div", &[("class", "text-center py-3 text-body-secondary")], "No news yet.");
        return m.into_string();
    }

    for card in cards {
        let id = card.id.to_string();
        let class = if card.is_new { "news-item new" } else { "news-item" };
        let views = format!("{} views", card.view_count);

        m.elem("div", &[("class", class), ("data-news-id", id.as_str())], |m| {
            match card.image_url.as_deref().and_then(safe_url) {
                Some(src) => m.void_elem(
                    "img",
                    &[("class", "news-thumb"), ("src", src), ("alt", card.title.as_str())],
                ),
                None => m.text_elem("div", &[("class", "news-thumb placeholder")], "📰"),
            };
            m.elem("div", &[("class", "news-body")], |m| {
                m.text_elem("span", &[("class", "news-category")], &card.category);
                m.text_elem("div", &[("class", "news-title")], &card.title);
                m.elem("div", &[("class", "news-meta")], |m| {
                    m.text_elem("span", &[], &card.time_ago);
                    m.text_elem("span", &[], &views);
                });
            });
        });
    }

    m.into_string()
}

pub fn board_list(cards: &[BoardPostCard]) -> String {
    let mut m = Markup::new();

    if cards.is_empty() {
        m.text_elem(
            "p",
            &[("class", "text-body-secondary text-center py-3")],
            "No posts yet.",
        );
        return m.into_string();
    }

    for card in cards {
        let id = card.id.to_string();
        let category_class = format!("board-post-category category-{}", card.category);

        m.elem("div", &[("class", "board-post-item"), ("data-post-id", id.as_str())], |m| {
            m.elem("div", &[("class", "board-post-header")], |m| {
                m.text_elem("span", &[("class", category_class.as_str())], card.category_label);
                m.text_elem("h4", &[("class", "board-post-title")], &card.title);
            });
            m.elem("div", &[("class", "board-post-meta")], |m| {
                m.elem("div", &[("class", "board-post-author")], |m| {
                    if let Some(src) = card.author_img.as_deref().and_then(safe_url) {
                        m.void_elem("img", &[("src", src), ("alt", card.author_name.as_str())]);
                    }
                    m.text_elem("span", &[], &card.author_name);
                });
                m.text_elem("span", &[("class", "board-post-time")], &card.time_ago);
            });
        });
    }

    m.into_string()
}

/// Comment list with a "view all" link when the preview does not show everything
pub fn comment_list(preview: &CommentPreviewView) -> String {
    let mut m = Markup::new();

    if preview.comments.is_empty() {
        m.text_elem(
            "p",
            &[("class", "text-body-secondary text-center py-3")],
            "Be the first to comment!",
        );
        return m.into_string();
    }

    for comment in &preview.comments {
        let id = comment.id.to_string();
        m.elem(
            "div",
            &[("class", "comment-item mb-2 pb-2 border-bottom"), ("data-comment-id", id.as_str())],
            |m| {
                m.elem("div", &[("class", "d-flex justify-content-between mb-1")], |m| {
                    m.text_elem("strong", &[("class", "text-dark")], &comment.author_name);
                    m.text_elem("small", &[("class", "text-body-secondary")], &comment.date_label);
                });
                m.elem("p", &[("class", "mb-0 text-body-secondary")], |m| {
                    m.multiline(&comment.content);
                });
            },
        );
    }

    if preview.has_more {
        let href = format!("news-detail.html?id={}", preview.news_id);
        let label = format!("View all comments ({})", preview.total);
        m.elem("div", &[("class", "text-center mt-3")], |m| {
            m.text_elem(
                "a",
                &[("href", href.as_str()), ("class", "btn btn-sm btn-outline-primary")],
                &label,
            );
        });
    }

    m.into_string()
}

pub fn participant_list(view: &ParticipantListView) -> String {
    let mut m = Markup::new();
    let event_id = view.event_id.to_string();
    let count = view.count.to_string();

    m.elem("div", &[("class", "participants"), ("data-event-id", event_id.as_str())], |m| {
        m.elem("strong", &[("class", "text-success")], |m| {
            m.text("Attendees ");
            m.text_elem("span", &[("class", "badge bg-success")], &count);
        });

        m.elem("div", &[("class", "mt-2")], |m| {
            if view.members.is_empty() {
                m.text_elem(
                    "p",
                    &[("class", "text-body-secondary mb-0 small")],
                    "No attendees yet.",
                );
            }
            for name in &view.members {
                m.text_elem(
                    "span",
                    &[("class", "badge bg-success me-1 mb-1"), ("data-member", name.as_str())],
                    name,
                );
            }
        });
    });

    m.into_string()
}

pub fn member_directory(groups: &[MemberGroupView]) -> String {
    let mut m = Markup::new();

    for group in groups {
        let count = format!("{} members", group.count);
        let border = format!("border-left-color: {}", group.color);

        m.elem("div", &[("class", "col-12"), ("data-category", group.key)], |m| {
            m.elem("div", &[("class", "category-header-custom")], |m| {
                m.text_elem("span", &[("class", "category-icon")], group.icon);
                m.text_elem("h3", &[], group.title);
                m.text_elem("span", &[("class", "category-count")], &count);
            });
        });

        for member in &group.members {
            let image = format!("{}{}", TEAM_IMAGE_DIR, member.image);
            m.elem("div", &[("class", "col-12 member-card"), ("style", border.as_str())], |m| {
                if let Some(src) = safe_url(&image) {
                    m.void_elem(
                        "img",
                        &[("class", "rounded-circle img-fluid"), ("src", src), ("alt", member.name.as_str())],
                    );
                }
                m.elem("h4", &[("class", "mb-2")], |m| {
                    m.text(&member.name);
                    if let (Some(label), Some(badge)) = (&member.role_label, member.role_badge) {
                        let class = format!("badge {} ms-2", badge);
                        m.text(" ");
                        m.text_elem("span", &[("class", class.as_str())], label);
                    }
                });
                if let Some(company) = &member.company {
                    labelled_line(m, "Company", company);
                }
                if let Some(field) = &member.field {
                    labelled_line(m, "Field", field);
                }
                m.text_elem("p", &[("class", "text-body-tertiary mb-0")], &member.description);
            });
        }
    }

    m.into_string()
}

/// Error panel shown in place of a fragment that failed to load
pub fn error_panel(err: &AppError) -> String {
    let mut m = Markup::new();
    m.elem("div", &[("class", "alert alert-danger"), ("role", "alert")], |m| {
        m.text(&err.to_string());
    });
    m.into_string()
}

fn labelled_line(m: &mut Markup, label: &str, value: &str) {
    m.elem("p", &[("class", "mb-2")], |m| {
        m.text_elem("strong", &[], &format!("{}:", label));
        m.text(" ");
        m.text(value);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::models::{CommentView, MemberView};
    use chrono::Utc;
    use uuid::Uuid;

    fn comment(author: &str, content: &str) -> CommentView {
        CommentView {
            id: Uuid::new_v4(),
            parent_id: None,
            author_name: author.into(),
            content: content.into(),
            created_at: Utc::now(),
            date_label: "2024-05-10 12:00".into(),
        }
    }

    #[test]
    fn test_comment_list_escapes_and_links_all() {
        let news_id = Uuid::new_v4();
        let preview = CommentPreviewView {
            news_id,
            comments: vec![comment("<script>alert(1)</script>", "hi\n<b>there</b>")],
            shown: 1,
            total: 5,
            has_more: true,
        };

        let html = comment_list(&preview);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("hi<br>&lt;b&gt;there&lt;/b&gt;"));
        assert!(html.contains(&format!("news-detail.html?id={}", news_id)));
        assert!(html.contains("View all comments (5)"));
    }

    #[test]
    fn test_comment_list_without_more() {
        let preview = CommentPreviewView {
            news_id: Uuid::new_v4(),
            comments: vec![comment("Kim", "hello")],
            shown: 1,
            total: 1,
            has_more: false,
        };
        assert!(!comment_list(&preview).contains("View all"));
    }

    #[test]
    fn test_empty_participants() {
        let view = ParticipantListView {
            event_id: Uuid::new_v4(),
            count: 0,
            members: vec![],
        };
        let html = participant_list(&view);
        assert!(html.contains("No attendees yet."));
        assert!(html.contains("<span class=\"badge bg-success\">0</span>"));
    }

    #[test]
    fn test_member_directory_hides_plain_member_badge() {
        let group = MemberGroupView {
            key: "other",
            title: "Other Members",
            icon: "👥",
            color: "#95a5a6",
            count: 1,
            members: vec![MemberView {
                name: "Lee".into(),
                role_label: None,
                role_badge: None,
                company: None,
                field: Some("IT".into()),
                image: "4.jpg".into(),
                description: "d".into(),
            }],
        };

        let html = member_directory(&[group]);
        assert!(html.contains("1 members"));
        assert!(html.contains("src=\"assets/img/team/4.jpg\""));
        assert!(!html.contains("badge"));
        assert!(html.contains("<strong>Field:</strong> IT"));
    }

    fn news_card(title: &str, image_url: Option<&str>, is_new: bool) -> NewsCard {
        NewsCard {
            id: Uuid::new_v4(),
            title: title.into(),
            excerpt: "excerpt".into(),
            category: "notice".into(),
            badge_label: "Notice".into(),
            badge_class: "bg-primary",
            comment_count: Some(0),
            view_count: 7,
            created_at: Utc::now(),
            date_label: "2024-05-10".into(),
            time_ago: "3 h ago".into(),
            is_new,
            carries_attendance: false,
            image_url: image_url.map(String::from),
        }
    }

    #[test]
    fn test_news_list_filters_image_urls() {
        let html = news_list(&[
            news_card("Picnic", Some("https://cdn.example.com/p.jpg"), false),
            news_card("Bad", Some("javascript:alert(1)"), false),
        ]);

        assert!(html.contains("src=\"https://cdn.example.com/p.jpg\""));
        assert!(!html.contains("javascript:"));
        assert_eq!(html.matches("<img").count(), 1);
    }

    #[test]
    fn test_news_panel_thumbnails_and_new_flag() {
        let html = news_panel(&[
            news_card("<b>Fresh</b>", Some("https://cdn.example.com/f.jpg"), true),
            news_card("Old", Some("javascript:alert(1)"), false),
        ]);

        assert!(html.contains("class=\"news-item new\""));
        assert!(html.contains("&lt;b&gt;Fresh&lt;/b&gt;"));
        assert!(html.contains("src=\"https://cdn.example.com/f.jpg\""));
        assert!(html.contains("news-thumb placeholder"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("7 views"));
        assert_eq!(news_panel(&[]), "<div class=\"text-center py-3 text-body-secondary\">No news yet.</div>");
    }

    #[test]
    fn test_error_panel_escapes_message() {
        let html = error_panel(&AppError::NotFound("<news>".into()));
        assert_eq!(
            html,
            "<div class=\"alert alert-danger\" role=\"alert\">Not found: &lt;news&gt;</div>"
        );
    }
}
