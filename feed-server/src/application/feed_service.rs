use chrono::{DateTime, Utc};
use tracing::info;

use crate::data::post_repository::{PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Comment, Post, ReactionCounts, Report};

#[derive(Debug, Clone)]
pub(crate) struct CreatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) like_count: Option<u64>,
    pub(crate) reactions: Option<ReactionCounts>,
}

#[derive(Debug, Clone)]
pub(crate) struct UpdatePostRequest {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) like_count: Option<u64>,
}

const DEMO_POSTS: &[(&str, &str, &str)] = &[
    (
        "Welcome to the feed",
        "This is the first post. Like it, react to it or leave a comment.",
        "2024-03-01T09:00:00Z",
    ),
    (
        "Campus library hours",
        "The library now stays open until 22:00 on weekdays during exam season.",
        "2024-03-04T14:30:00Z",
    ),
    (
        "Programming club meetup",
        "We meet every Thursday in lab 3. Bring a laptop and a problem to solve.",
        "2024-03-07T18:15:00Z",
    ),
];

pub(crate) struct FeedService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> FeedService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Seeds the demo posts. Meant to run once, on a fresh repository.
    pub(crate) async fn populate(&self) -> usize {
        for (title, content, date) in DEMO_POSTS {
            let date = DateTime::parse_from_rfc3339(date)
                .map(|date| date.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now());
            self.repo
                .insert_post(Post::new(*title, *content, date, None, None))
                .await;
        }
        info!(count = DEMO_POSTS.len(), "seeded demo posts");
        DEMO_POSTS.len()
    }

    pub(crate) async fn list_posts(&self) -> Vec<Post> {
        self.repo.list_posts().await
    }

    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .get_post(id)
            .await
            .ok_or(DomainError::post_not_found(id))
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Post {
        let post = Post::new(
            req.title,
            req.content,
            req.date,
            req.like_count,
            req.reactions,
        );
        let stored = self.repo.insert_post(post).await;
        info!(post_id = stored.id, "post created");
        stored
    }

    pub(crate) async fn update_post(
        &self,
        id: i64,
        req: UpdatePostRequest,
    ) -> Result<(), DomainError> {
        let patch = PostPatch {
            title: req.title,
            content: req.content,
            date: req.date,
            like_count: req.like_count,
        };
        if !self.repo.update_post(id, patch).await {
            return Err(DomainError::post_not_found(id));
        }
        info!(post_id = id, "post updated");
        Ok(())
    }

    pub(crate) async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        if !self.repo.delete_post(id).await {
            return Err(DomainError::post_not_found(id));
        }
        info!(post_id = id, "post deleted");
        Ok(())
    }

    pub(crate) async fn like_post(&self, id: i64) -> Result<u64, DomainError> {
        self.repo
            .like_post(id)
            .await
            .ok_or(DomainError::post_not_found(id))
    }

    /// Returns the post's reaction counts after the call.
    pub(crate) async fn react_to_post(
        &self,
        id: i64,
        emoji: &str,
    ) -> Result<ReactionCounts, DomainError> {
        if !self.repo.add_reaction(id, emoji).await {
            return Err(DomainError::post_not_found(id));
        }
        // The post may be deleted in between; that is reported as not found.
        let post = self.get_post(id).await?;
        Ok(post.reactions().clone())
    }

    pub(crate) async fn comment_on_post(
        &self,
        id: i64,
        author: String,
        text: String,
    ) -> Result<(), DomainError> {
        if !self.repo.add_comment(id, Comment { author, text }).await {
            return Err(DomainError::post_not_found(id));
        }
        info!(post_id = id, "comment added");
        Ok(())
    }

    pub(crate) async fn list_comments(&self, id: i64) -> Result<Vec<Comment>, DomainError> {
        Ok(self.get_post(id).await?.comments().to_vec())
    }

    pub(crate) async fn report_post(
        &self,
        id: i64,
        author: String,
        text: String,
    ) -> Result<(), DomainError> {
        if !self.repo.add_report(id, Report { author, text }).await {
            return Err(DomainError::post_not_found(id));
        }
        info!(post_id = id, "report filed");
        Ok(())
    }

    pub(crate) async fn list_reports(&self, id: i64) -> Result<Vec<Report>, DomainError> {
        Ok(self.get_post(id).await?.reports().to_vec())
    }
}
