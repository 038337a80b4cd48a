use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::error::{FeedClientError, FeedClientResult};
use crate::models::{Comment, NewPost, Post, PostUpdate, Report};

#[derive(Debug, Serialize)]
struct EntryRequestDto<'a> {
    author: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct ReactRequestDto<'a> {
    emoji: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeResponseDto {
    like_count: u64,
}

#[derive(Debug, Deserialize)]
struct ReactionResponseDto {
    reactions: BTreeMap<String, u64>,
}

#[derive(Debug, Clone)]
/// HTTP client for the feed server's REST API.
pub struct FeedClient {
    base_url: String,
    client: Client,
}

impl FeedClient {
    /// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> FeedClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> FeedClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .or(body.message)
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        FeedClientError::from_http_status(status, Some(message))
    }

    async fn execute<TRes>(&self, request: RequestBuilder) -> FeedClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(FeedClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(FeedClientError::from_reqwest)
    }

    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> FeedClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let request = self.client.request(method, self.endpoint(path)).json(body);
        self.execute(request).await
    }

    async fn send_empty<TRes>(&self, method: Method, path: &str) -> FeedClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let request = self.client.request(method, self.endpoint(path));
        self.execute(request).await
    }

    /// Lists every post, oldest first.
    pub async fn list_posts(&self) -> FeedClientResult<Vec<Post>> {
        self.send_empty(Method::GET, "/api/posts").await
    }

    /// Fetches one post.
    pub async fn get_post(&self, id: i64) -> FeedClientResult<Post> {
        self.send_empty(Method::GET, &format!("/api/posts/{id}"))
            .await
    }

    /// Creates a post and returns it with its assigned id.
    pub async fn create_post(&self, post: &NewPost) -> FeedClientResult<Post> {
        self.send_json(Method::POST, "/api/posts", post).await
    }

    /// Replaces title, content, date and optionally the like count.
    pub async fn update_post(&self, id: i64, update: &PostUpdate) -> FeedClientResult<()> {
        let _: IgnoredAny = self
            .send_json(Method::PUT, &format!("/api/posts/{id}"), update)
            .await?;
        Ok(())
    }

    /// Deletes a post.
    pub async fn delete_post(&self, id: i64) -> FeedClientResult<()> {
        let _: IgnoredAny = self
            .send_empty(Method::DELETE, &format!("/api/posts/{id}"))
            .await?;
        Ok(())
    }

    /// Likes a post and returns the new like count.
    pub async fn like_post(&self, id: i64) -> FeedClientResult<u64> {
        let dto: LikeResponseDto = self
            .send_empty(Method::POST, &format!("/api/posts/{id}/like"))
            .await?;
        Ok(dto.like_count)
    }

    /// Adds a reaction and returns the post's reaction counts.
    ///
    /// Unknown emoji keys are accepted by the server and leave the counts as they were.
    pub async fn react(&self, id: i64, emoji: &str) -> FeedClientResult<BTreeMap<String, u64>> {
        let payload = ReactRequestDto { emoji };
        let dto: ReactionResponseDto = self
            .send_json(Method::POST, &format!("/api/posts/{id}/reactions"), &payload)
            .await?;
        Ok(dto.reactions)
    }

    /// Appends a comment.
    pub async fn add_comment(&self, id: i64, author: &str, text: &str) -> FeedClientResult<()> {
        let payload = EntryRequestDto { author, text };
        let _: IgnoredAny = self
            .send_json(Method::POST, &format!("/api/posts/{id}/comments"), &payload)
            .await?;
        Ok(())
    }

    /// Lists a post's comments, oldest first.
    pub async fn list_comments(&self, id: i64) -> FeedClientResult<Vec<Comment>> {
        self.send_empty(Method::GET, &format!("/api/posts/{id}/comments"))
            .await
    }

    /// Files an abuse report.
    pub async fn add_report(&self, id: i64, author: &str, text: &str) -> FeedClientResult<()> {
        let payload = EntryRequestDto { author, text };
        let _: IgnoredAny = self
            .send_json(Method::POST, &format!("/api/posts/{id}/reports"), &payload)
            .await?;
        Ok(())
    }

    /// Lists a post's reports, oldest first.
    pub async fn list_reports(&self, id: i64) -> FeedClientResult<Vec<Report>> {
        self.send_empty(Method::GET, &format!("/api/posts/{id}/reports"))
            .await
    }
}
