use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::blog_posts::PostStatus;
use crate::models::{Author, Category, Post, Tag};
use crate::response::Pagination;

#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub body: String,
    pub author: Option<Author>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub slug: String,
    pub title_en: String,
    #[serde(default)]
    pub title_ru: String,
    #[serde(default)]
    pub title_ar: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub status: Option<PostStatus>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}
