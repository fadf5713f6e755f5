use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Brand, Category, Tag};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandListResponse {
    pub brands: Vec<Brand>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TagListResponse {
    pub tags: Vec<Tag>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub slug: String,
    pub name_en: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_ar: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBrandRequest {
    pub slug: String,
    pub name_en: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_ar: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTagRequest {
    pub slug: String,
    pub name: String,
}
