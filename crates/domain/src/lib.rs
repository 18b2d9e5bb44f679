mod auth;
mod errors;
mod likes;
mod models;
mod tree;

pub use auth::{authorize, authorize_owner};
pub use errors::{Error, Result};
pub use likes::LikeEngine;
pub use models::{
    Comment, Page, PageMeta, Report, ReportCategory, ReportStatus, ReportView, Role, SortMode,
    MAX_CONTENT_CHARS, MAX_DEPTH, MAX_REASON_CHARS, TOMBSTONE,
};
pub use tree::{assemble, CommentNode};
