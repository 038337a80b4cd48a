use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::post::{Comment, Post, Report};

#[derive(Debug, Clone)]
pub(crate) struct PostPatch {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) like_count: Option<u64>,
}

/// Store of posts. Not-found is reported through `Option`/`bool`;
/// there are no other failure modes.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    /// Stores `post` under the next free id, ignoring `post.id`.
    async fn insert_post(&self, post: Post) -> Post;
    async fn get_post(&self, id: i64) -> Option<Post>;
    async fn list_posts(&self) -> Vec<Post>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> bool;
    async fn delete_post(&self, id: i64) -> bool;
    async fn like_post(&self, id: i64) -> Option<u64>;
    /// `true` when the post exists, whether or not `emoji` was recognized.
    async fn add_reaction(&self, id: i64, emoji: &str) -> bool;
    async fn add_comment(&self, id: i64, comment: Comment) -> bool;
    async fn add_report(&self, id: i64, report: Report) -> bool;
}
