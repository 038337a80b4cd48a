use std::sync::Arc;

use crate::application::feed_service::FeedService;
use crate::data::repositories::memory::post_repository::InMemoryPostRepository;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) feed_service: Arc<FeedService<InMemoryPostRepository>>,
}

impl AppState {
    pub(crate) fn new(feed_service: Arc<FeedService<InMemoryPostRepository>>) -> Self {
        Self { feed_service }
    }
}
