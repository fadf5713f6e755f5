use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Brand, Category, Product, Rating};
use crate::response::Pagination;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
    pub brand: Option<Brand>,
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub slug: String,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub name_en: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub name_ar: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub name_en: Option<String>,
    pub name_ru: Option<String>,
    pub name_ar: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub discount_price: Option<i64>,
    pub stock: Option<i32>,
    pub is_featured: Option<bool>,
    pub is_new: Option<bool>,
}
