use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::feed_service::{CreatePostRequest, UpdatePostRequest};
use crate::domain::post::{Comment, Post, Reaction, ReactionCounts, Report};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreatePostDto {
    pub(crate) title: String,
    pub(crate) content: String,
    /// RFC 3339, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD`; defaults to now.
    pub(crate) date: Option<String>,
    pub(crate) like_count: Option<u64>,
    /// Initial counts per category; unknown keys are ignored.
    pub(crate) reactions: Option<BTreeMap<String, u64>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdatePostDto {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) date: Option<String>,
    /// Omit to keep the current count.
    pub(crate) like_count: Option<u64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct ReactDto {
    /// `Laugh`, `Surprise`, `Anger`, `Cry` (or `Risos`, `Surpresa`, `Raiva`, `Choro`).
    #[serde(default)]
    #[validate(length(min = 1, message = "emoji is required"))]
    pub(crate) emoji: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) author: String,
    pub(crate) text: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReportDto {
    pub(crate) author: String,
    pub(crate) text: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) like_count: u64,
    pub(crate) reactions: BTreeMap<String, u64>,
    pub(crate) comments: Vec<CommentDto>,
    pub(crate) reports: Vec<ReportDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageDto {
    pub(crate) message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LikeResponseDto {
    pub(crate) message: String,
    pub(crate) like_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ReactionResponseDto {
    pub(crate) message: String,
    pub(crate) reactions: BTreeMap<String, u64>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            author: comment.author,
            text: comment.text,
        }
    }
}

impl From<Report> for ReportDto {
    fn from(report: Report) -> Self {
        Self {
            author: report.author,
            text: report.text,
        }
    }
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            reactions: reactions_dto(post.reactions()),
            like_count: post.like_count(),
            comments: post.comments().iter().cloned().map(CommentDto::from).collect(),
            reports: post.reports().iter().cloned().map(ReportDto::from).collect(),
            id: post.id,
            title: post.title,
            content: post.content,
            date: post.date,
        }
    }
}

fn message(text: &str) -> Json<MessageDto> {
    Json(MessageDto {
        message: text.to_string(),
    })
}

fn reactions_dto(counts: &ReactionCounts) -> BTreeMap<String, u64> {
    counts
        .iter()
        .map(|(reaction, count)| (reaction.to_string(), *count))
        .collect()
}

fn reactions_from_dto(raw: BTreeMap<String, u64>) -> ReactionCounts {
    raw.into_iter()
        .filter_map(|(key, count)| key.parse::<Reaction>().ok().map(|r| (r, count)))
        .collect()
}

/// Missing date means "now"; anything that is not a recognizable date is rejected.
pub(crate) fn parse_date(raw: Option<&str>) -> AppResult<DateTime<Utc>> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(Utc::now());
    };

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(date.and_utc());
    }
    if let Some(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(date.and_utc());
    }

    Err(AppError::BadRequest(format!("invalid date: '{raw}'")))
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts in insertion order", body = [PostDto])
    )
)]
pub(crate) async fn list_posts(State(state): State<AppState>) -> Json<Vec<PostDto>> {
    let posts = state.feed_service.list_posts().await;
    Json(posts.into_iter().map(PostDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PostDto>> {
    let post = state.feed_service.get_post(id).await?;
    Ok(Json(PostDto::from(post)))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Invalid date")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let req = CreatePostRequest {
        date: parse_date(dto.date.as_deref())?,
        title: dto.title,
        content: dto.content,
        like_count: dto.like_count,
        reactions: dto.reactions.map(reactions_from_dto),
    };

    let post = state.feed_service.create_post(req).await;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = MessageDto),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<Json<MessageDto>> {
    let req = UpdatePostRequest {
        date: parse_date(dto.date.as_deref())?,
        title: dto.title,
        content: dto.content,
        like_count: dto.like_count,
    };

    state.feed_service.update_post(id, req).await?;
    Ok(message("post updated"))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageDto>> {
    state.feed_service.delete_post(id).await?;
    Ok(message("post deleted"))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/like",
    tag = "engagement",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post liked", body = LikeResponseDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LikeResponseDto>> {
    let like_count = state.feed_service.like_post(id).await?;
    Ok(Json(LikeResponseDto {
        message: "post liked".to_string(),
        like_count,
    }))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/reactions",
    tag = "engagement",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = ReactDto,
    responses(
        (status = 200, description = "Reaction recorded", body = ReactionResponseDto),
        (status = 400, description = "Emoji missing"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn react_to_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<ReactDto>,
) -> AppResult<Json<ReactionResponseDto>> {
    dto.validate()?;
    let reactions = state.feed_service.react_to_post(id, &dto.emoji).await?;
    Ok(Json(ReactionResponseDto {
        message: "reaction added".to_string(),
        reactions: reactions_dto(&reactions),
    }))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/comments",
    tag = "engagement",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = CommentDto,
    responses(
        (status = 200, description = "Comment added", body = MessageDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<CommentDto>,
) -> AppResult<Json<MessageDto>> {
    state
        .feed_service
        .comment_on_post(id, dto.author, dto.text)
        .await?;
    Ok(message("comment added"))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/comments",
    tag = "engagement",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Comments in insertion order", body = [CommentDto]),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<CommentDto>>> {
    let comments = state.feed_service.list_comments(id).await?;
    Ok(Json(comments.into_iter().map(CommentDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/posts/{id}/reports",
    tag = "engagement",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = ReportDto,
    responses(
        (status = 200, description = "Report filed", body = MessageDto),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn add_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<ReportDto>,
) -> AppResult<Json<MessageDto>> {
    state
        .feed_service
        .report_post(id, dto.author, dto.text)
        .await?;
    Ok(message("report added"))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}/reports",
    tag = "engagement",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Reports in insertion order", body = [ReportDto]),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn list_reports(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<ReportDto>>> {
    let reports = state.feed_service.list_reports(id).await?;
    Ok(Json(reports.into_iter().map(ReportDto::from).collect()))
}
