use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::wishlist::{
        AddWishlistRequest, WishlistAddResponse, WishlistListResponse, WishlistRemoveResponse,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    routes::params::PageParams,
    services::wishlist_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveWishlistQuery {
    pub product_id: Uuid,
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_wishlist)
            .post(add_to_wishlist)
            .delete(remove_from_wishlist),
    )
}

#[utoipa::path(
    get,
    path = "/api/user/wishlist",
    params(
        ("page" = Option<i64>, Query),
        ("limit" = Option<i64>, Query),
    ),
    responses((status = 200, description = "Wishlisted products", body = WishlistListResponse)),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PageParams>,
) -> AppResult<Json<WishlistListResponse>> {
    let resp = wishlist_service::list_wishlist(&state.pool, &user, page).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/user/wishlist",
    request_body = AddWishlistRequest,
    responses(
        (status = 200, description = "Added (or already present)", body = WishlistAddResponse),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddWishlistRequest>,
) -> AppResult<Json<WishlistAddResponse>> {
    let resp = wishlist_service::add_to_wishlist(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/user/wishlist",
    params(("product_id" = Uuid, Query, description = "Product to remove")),
    responses((status = 200, description = "Removed (idempotent)", body = WishlistRemoveResponse)),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RemoveWishlistQuery>,
) -> AppResult<Json<WishlistRemoveResponse>> {
    let resp = wishlist_service::remove_from_wishlist(&state.pool, &user, query.product_id).await?;
    Ok(Json(resp))
}
