use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::data::post_repository::{PostPatch, PostRepository};
use crate::domain::post::{Comment, Post, Report};

/// Process-local post store. Contents are lost on restart.
#[derive(Debug)]
pub(crate) struct InMemoryPostRepository {
    state: RwLock<State>,
}

// Ids are handed out in increasing order, so the map iterates in insertion order.
#[derive(Debug)]
struct State {
    posts: BTreeMap<i64, Post>,
    next_id: i64,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(State {
                posts: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    async fn with_post<T>(&self, id: i64, f: impl FnOnce(&mut Post) -> T) -> Option<T> {
        let mut state = self.state.write().await;
        state.posts.get_mut(&id).map(f)
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert_post(&self, mut post: Post) -> Post {
        let mut state = self.state.write().await;
        post.id = state.next_id;
        state.next_id += 1;
        state.posts.insert(post.id, post.clone());
        post
    }

    async fn get_post(&self, id: i64) -> Option<Post> {
        self.state.read().await.posts.get(&id).cloned()
    }

    async fn list_posts(&self) -> Vec<Post> {
        self.state.read().await.posts.values().cloned().collect()
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> bool {
        self.with_post(id, |post| {
            post.apply_edit(patch.title, patch.content, patch.date, patch.like_count)
        })
        .await
        .is_some()
    }

    async fn delete_post(&self, id: i64) -> bool {
        self.state.write().await.posts.remove(&id).is_some()
    }

    async fn like_post(&self, id: i64) -> Option<u64> {
        self.with_post(id, Post::like).await
    }

    async fn add_reaction(&self, id: i64, emoji: &str) -> bool {
        match self.with_post(id, |post| post.add_reaction(emoji)).await {
            Some(recognized) => {
                if !recognized {
                    debug!(post_id = id, emoji, "ignoring unknown reaction");
                }
                true
            }
            None => false,
        }
    }

    async fn add_comment(&self, id: i64, comment: Comment) -> bool {
        self.with_post(id, |post| post.add_comment(comment))
            .await
            .is_some()
    }

    async fn add_report(&self, id: i64, report: Report) -> bool {
        self.with_post(id, |post| post.add_report(report))
            .await
            .is_some()
    }
}
