use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::taxonomy::{
        BrandListResponse, CategoryListResponse, CreateBrandRequest, CreateCategoryRequest,
        CreateTagRequest, TagListResponse,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Brand, Category, Tag},
    services::taxonomy_service,
    state::AppState,
};

pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/{id}", delete(delete_category))
}

pub fn brands_router() -> Router<AppState> {
    Router::new().route("/", get(list_brands).post(create_brand))
}

pub fn tags_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/{id}", delete(delete_tag))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses((status = 200, description = "All categories, alphabetical", body = CategoryListResponse)),
    tag = "Taxonomy"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<CategoryListResponse>> {
    let resp = taxonomy_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Created category", body = Category),
        (status = 409, description = "Duplicate slug"),
    ),
    security(("bearer_auth" = [])),
    tag = "Taxonomy"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = taxonomy_service::create_category(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Deleted category"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Taxonomy"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    taxonomy_service::delete_category(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/brands",
    responses((status = 200, description = "All brands, alphabetical", body = BrandListResponse)),
    tag = "Taxonomy"
)]
pub async fn list_brands(State(state): State<AppState>) -> AppResult<Json<BrandListResponse>> {
    let resp = taxonomy_service::list_brands(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/brands",
    request_body = CreateBrandRequest,
    responses((status = 201, description = "Created brand", body = Brand)),
    security(("bearer_auth" = [])),
    tag = "Taxonomy"
)]
pub async fn create_brand(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBrandRequest>,
) -> AppResult<(StatusCode, Json<Brand>)> {
    let brand = taxonomy_service::create_brand(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

#[utoipa::path(
    get,
    path = "/api/tags",
    responses((status = 200, description = "All tags, alphabetical", body = TagListResponse)),
    tag = "Taxonomy"
)]
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<TagListResponse>> {
    let resp = taxonomy_service::list_tags(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Created tag", body = Tag),
        (status = 409, description = "Duplicate slug"),
    ),
    security(("bearer_auth" = [])),
    tag = "Taxonomy"
)]
pub async fn create_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTagRequest>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let tag = taxonomy_service::create_tag(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    params(("id" = Uuid, Path, description = "Tag ID")),
    responses(
        (status = 204, description = "Deleted tag"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Taxonomy"
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    taxonomy_service::delete_tag(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
