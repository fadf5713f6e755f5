use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity;
use crate::entity::blog_posts::PostStatus;
use crate::entity::orders::{OrderStatus, PaymentStatus};

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub slug: String,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub name_en: String,
    pub name_ru: String,
    pub name_ar: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    pub is_featured: bool,
    pub is_new: bool,
    pub rating_avg: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::products::Model> for Product {
    fn from(m: entity::products::Model) -> Self {
        Self {
            id: m.id,
            slug: m.slug,
            category_id: m.category_id,
            brand_id: m.brand_id,
            name_en: m.name_en,
            name_ru: m.name_ru,
            name_ar: m.name_ar,
            description: m.description,
            price: m.price,
            discount_price: m.discount_price,
            stock: m.stock,
            is_featured: m.is_featured,
            is_new: m.is_new,
            rating_avg: m.rating_avg,
            review_count: m.review_count,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name_en: String,
    pub name_ru: String,
    pub name_ar: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::categories::Model> for Category {
    fn from(m: entity::categories::Model) -> Self {
        Self {
            id: m.id,
            slug: m.slug,
            name_en: m.name_en,
            name_ru: m.name_ru,
            name_ar: m.name_ar,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: Uuid,
    pub slug: String,
    pub name_en: String,
    pub name_ru: String,
    pub name_ar: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::brands::Model> for Brand {
    fn from(m: entity::brands::Model) -> Self {
        Self {
            id: m.id,
            slug: m.slug,
            name_en: m.name_en,
            name_ru: m.name_ru,
            name_ar: m.name_ar,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::tags::Model> for Tag {
    fn from(m: entity::tags::Model) -> Self {
        Self {
            id: m.id,
            slug: m.slug,
            name: m.name,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Rating {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

impl From<entity::product_ratings::Model> for Rating {
    fn from(m: entity::product_ratings::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            user_id: m.user_id,
            rating: m.rating,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_address: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::orders::Model> for Order {
    fn from(m: entity::orders::Model) -> Self {
        Self {
            id: m.id,
            order_number: m.order_number,
            status: m.status,
            payment_status: m.payment_status,
            total_amount: m.total_amount,
            customer_name: m.customer_name,
            customer_email: m.customer_email,
            customer_phone: m.customer_phone,
            shipping_address: m.shipping_address,
            payment_method: m.payment_method,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: i64,
    pub subtotal: i64,
    pub created_at: DateTime<Utc>,
}

impl From<entity::order_items::Model> for OrderItem {
    fn from(m: entity::order_items::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            product_id: m.product_id,
            quantity: m.quantity,
            unit_price: m.unit_price,
            subtotal: m.subtotal,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

/// List-shaped blog post; `body` is only returned by the detail endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title_en: String,
    pub title_ru: String,
    pub title_ar: String,
    pub excerpt: Option<String>,
    pub status: PostStatus,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::blog_posts::Model> for Post {
    fn from(m: entity::blog_posts::Model) -> Self {
        Self {
            id: m.id,
            slug: m.slug,
            title_en: m.title_en,
            title_ru: m.title_ru,
            title_ar: m.title_ar,
            excerpt: m.excerpt,
            status: m.status,
            author_id: m.author_id,
            category_id: m.category_id,
            views: m.views,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

/// Public author shape; account details stay with the auth collaborator.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}

impl From<entity::users::Model> for Author {
    fn from(m: entity::users::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
