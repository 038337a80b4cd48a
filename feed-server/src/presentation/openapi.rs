use utoipa::OpenApi;

use crate::presentation::handlers::posts::{
    CommentDto, CreatePostDto, LikeResponseDto, MessageDto, PostDto, ReactDto,
    ReactionResponseDto, ReportDto, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::posts::like_post,
        crate::presentation::handlers::posts::react_to_post,
        crate::presentation::handlers::posts::add_comment,
        crate::presentation::handlers::posts::list_comments,
        crate::presentation::handlers::posts::add_report,
        crate::presentation::handlers::posts::list_reports
    ),
    components(
        schemas(
            CreatePostDto,
            UpdatePostDto,
            ReactDto,
            CommentDto,
            ReportDto,
            PostDto,
            MessageDto,
            LikeResponseDto,
            ReactionResponseDto
        )
    ),
    tags(
        (name = "posts", description = "Post endpoints"),
        (name = "engagement", description = "Likes, reactions, comments and reports")
    )
)]
pub(crate) struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn openapi_lists_engagement_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/api/posts",
            "/api/posts/{id}",
            "/api/posts/{id}/like",
            "/api/posts/{id}/reactions",
            "/api/posts/{id}/comments",
            "/api/posts/{id}/reports",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }
}
