use axum::Router;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::posts::{
    add_comment, add_report, create_post, delete_post, get_post, like_post, list_comments,
    list_posts, list_reports, react_to_post, update_post,
};

pub(crate) fn router() -> Router<AppState> {
    let posts = Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{id}", get(get_post).put(update_post).delete(delete_post));

    let engagement = Router::new()
        .route("/{id}/like", post(like_post))
        .route("/{id}/reactions", post(react_to_post))
        .route("/{id}/comments", get(list_comments).post(add_comment))
        .route("/{id}/reports", get(list_reports).post(add_report));

    posts.merge(engagement)
}
