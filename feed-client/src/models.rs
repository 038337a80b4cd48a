use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Comment attached to a post.
pub struct Comment {
    /// Who wrote the comment.
    pub author: String,
    /// Comment body.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Abuse report filed against a post.
pub struct Report {
    /// Who filed the report.
    pub author: String,
    /// Reason given by the reporter.
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Post as returned by the server, engagement included.
pub struct Post {
    /// Server-assigned identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// Post date (UTC).
    pub date: DateTime<Utc>,
    /// Number of likes.
    pub like_count: u64,
    /// Count per reaction category (`Laugh`, `Surprise`, `Anger`, `Cry`).
    pub reactions: BTreeMap<String, u64>,
    /// Comments, oldest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Reports, oldest first.
    #[serde(default)]
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Payload for creating a post.
pub struct NewPost {
    /// Title.
    pub title: String,
    /// Body.
    pub content: String,
    /// `YYYY-MM-DD` or RFC 3339; the server uses the current time when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Initial like count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    /// Initial reaction counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<BTreeMap<String, u64>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
/// Payload for editing a post. Engagement is never touched by an edit.
pub struct PostUpdate {
    /// New title.
    pub title: String,
    /// New body.
    pub content: String,
    /// New date; the server uses the current time when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// New like count; the current one is kept when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
}
