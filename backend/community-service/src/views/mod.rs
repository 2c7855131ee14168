//! Presentation: records in, view-models and escaped HTML fragments out
//!
//! Everything here is pure. Services fetch rows, this module shapes them.

pub mod format;
pub mod fragments;
pub mod html;
pub mod models;

pub use html::Markup;
pub use models::{
    ActivityView, BoardPostCard, CommentPreviewView, CommentView, MemberGroupView, MemberView,
    NewsCard, NewsDetailView, ParticipantListView,
};
