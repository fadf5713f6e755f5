use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod blog;
pub mod doc;
pub mod health;
pub mod orders;
pub mod params;
pub mod products;
pub mod ratings;
pub mod taxonomy;
pub mod wishlist;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/blog", blog::router())
        .nest("/orders", orders::router())
        .nest("/ratings", ratings::router())
        .nest("/user/wishlist", wishlist::router())
        .nest("/categories", taxonomy::categories_router())
        .nest("/brands", taxonomy::brands_router())
        .nest("/tags", taxonomy::tags_router())
        .nest("/admin", admin::router())
}
