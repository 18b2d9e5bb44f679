use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum nesting: root (0), reply (1), reply-to-reply (2).
pub const MAX_DEPTH: i64 = 3;
pub const MAX_CONTENT_CHARS: usize = 1000;
pub const MAX_REASON_CHARS: usize = 500;
/// Placeholder a soft-deleted comment's content is replaced with.
pub const TOMBSTONE: &str = "[deleted]";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub content: String,
    /// Materialized path: ancestor ids, root first, empty for root comments.
    pub path: Vec<String>,
    pub depth: i64,
    pub parent_id: Option<String>,
    pub is_edited: bool,
    pub edited_at: Option<NaiveDateTime>,
    pub is_deleted: bool,
    pub deleted_at: Option<NaiveDateTime>,
    pub likes_count: i64,
    pub reports_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Comment {
    /// A comment sitting at the depth limit cannot take replies.
    pub fn can_reply(&self) -> bool {
        self.depth < MAX_DEPTH - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Moderator,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "moderator" => Ok(Role::Moderator),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Newest,
    Oldest,
    Popular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    Spam,
    Harassment,
    Inappropriate,
    Misinformation,
    Other,
}

impl ReportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCategory::Spam => "spam",
            ReportCategory::Harassment => "harassment",
            ReportCategory::Inappropriate => "inappropriate",
            ReportCategory::Misinformation => "misinformation",
            ReportCategory::Other => "other",
        }
    }
}

impl FromStr for ReportCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spam" => Ok(ReportCategory::Spam),
            "harassment" => Ok(ReportCategory::Harassment),
            "inappropriate" => Ok(ReportCategory::Inappropriate),
            "misinformation" => Ok(ReportCategory::Misinformation),
            "other" => Ok(ReportCategory::Other),
            other => Err(format!("unknown report category: {}", other)),
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-way lifecycle: pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Dismissed,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Dismissed => "dismissed",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "dismissed" => Ok(ReportStatus::Dismissed),
            "resolved" => Ok(ReportStatus::Resolved),
            other => Err(format!("unknown report status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub comment_id: String,
    pub reporter_id: String,
    pub category: ReportCategory,
    pub reason_text: Option<String>,
    pub status: ReportStatus,
    pub created_at: NaiveDateTime,
}

/// A pending report joined with enough context for a moderator to act on it.
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: Report,
    pub comment_content: String,
    pub comment_author_id: String,
    pub post_id: String,
    pub post_title: String,
    pub post_slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}
