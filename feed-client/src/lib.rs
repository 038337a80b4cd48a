//! Client library for the social feed server's HTTP API.
//!
//! `FeedClient` covers every post operation: listing, fetching, creating,
//! editing and deleting posts, plus likes, emoji reactions, comments and
//! abuse reports.
//!
//! ```no_run
//! # async fn demo() -> feed_client::FeedClientResult<()> {
//! use feed_client::{FeedClient, NewPost};
//!
//! let client = FeedClient::new("http://127.0.0.1:8080")?;
//! let post = client
//!     .create_post(&NewPost {
//!         title: "Hello".to_string(),
//!         content: "World".to_string(),
//!         ..NewPost::default()
//!     })
//!     .await?;
//! let likes = client.like_post(post.id).await?;
//! assert_eq!(likes, 1);
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{FeedClientError, FeedClientResult};
pub use http_client::FeedClient;
pub use models::{Comment, NewPost, Post, PostUpdate, Report};
