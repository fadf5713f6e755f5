use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, WishlistEntry};
use crate::response::Pagination;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddWishlistRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistAddResponse {
    pub success: bool,
    pub already_present: bool,
    pub item: WishlistEntry,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistRemoveResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistListResponse {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}
