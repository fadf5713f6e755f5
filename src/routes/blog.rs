use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::posts::{CreatePostRequest, PostDetail, PostListResponse},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Post,
    routes::params::PostQuery,
    services::blog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{slug}", get(get_post).delete(delete_post))
}

#[utoipa::path(
    get,
    path = "/api/blog/posts",
    params(
        ("status" = Option<String>, Query, description = "draft or published"),
        ("category_id" = Option<String>, Query),
        ("tag_id" = Option<String>, Query),
        ("author_id" = Option<String>, Query),
        ("search" = Option<String>, Query),
        ("sort" = Option<String>, Query, description = "created_at, views, title"),
        ("order" = Option<String>, Query, description = "asc or desc"),
        ("page" = Option<i64>, Query),
        ("limit" = Option<i64>, Query),
    ),
    responses(
        (status = 200, description = "List posts", body = PostListResponse),
        (status = 400, description = "Invalid sort field or status"),
    ),
    tag = "Blog"
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> AppResult<Json<PostListResponse>> {
    let resp = blog_service::list_posts(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/blog/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post with author, category and tags", body = PostDetail),
        (status = 404, description = "Post not found or not published"),
    ),
    tag = "Blog"
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PostDetail>> {
    let resp = blog_service::get_post_by_slug(&state, &slug).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/blog/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Created post", body = Post),
        (status = 409, description = "Duplicate slug"),
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<Post>)> {
    let post = blog_service::create_post(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    delete,
    path = "/api/blog/posts/{id}",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Deleted post"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    blog_service::delete_post(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
