use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::feed_service::FeedService;
use data::repositories::memory::post_repository::InMemoryPostRepository;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env().context("invalid configuration")?;

    init_logging(&settings.log_level)?;

    let feed_service = FeedService::new(InMemoryPostRepository::new());
    if settings.seed_demo_posts {
        feed_service.populate().await;
    }
    info!(seeded = settings.seed_demo_posts, "post repository ready");

    let state = AppState::new(Arc::new(feed_service));
    server::run_http(&settings, state).await
}
