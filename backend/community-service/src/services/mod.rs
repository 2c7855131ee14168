//! Business logic layer
//!
//! Each service wraps the resolved [`remote_store::RemoteStore`] handle and issues
//! independent requests; nothing is cached between calls.

pub mod activity;
pub mod attendance;
pub mod board;
pub mod comments;
pub mod media;
pub mod members;
pub mod news;

pub use activity::{ActivityCounts, ActivityService};
pub use attendance::AttendanceService;
pub use board::BoardService;
pub use comments::{CommentPreview, CommentService};
pub use media::MediaService;
pub use members::{MemberDirectory, MemberGroup};
pub use news::NewsService;

/// Remote table names
pub(crate) mod tables {
    pub const NEWS: &str = "news";
    pub const BOARD_POSTS: &str = "board_posts";
    pub const COMMENTS: &str = "comments";
    pub const EVENT_PARTICIPANTS: &str = "event_participants";
}
