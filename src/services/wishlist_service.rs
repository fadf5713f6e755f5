use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::wishlist::{
        AddWishlistRequest, WishlistAddResponse, WishlistListResponse, WishlistRemoveResponse,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Product, WishlistEntry},
    response::Pagination,
    routes::params::PageParams,
};

pub async fn list_wishlist(
    pool: &DbPool,
    user: &AuthUser,
    page_params: PageParams,
) -> AppResult<WishlistListResponse> {
    let (page, limit, offset) = page_params.normalize();
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT p.*
        FROM wishlist_items w
        JOIN products p ON p.id = w.product_id
        WHERE w.user_id = $1
        ORDER BY w.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wishlist_items WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_one(pool)
        .await?;

    Ok(WishlistListResponse {
        products,
        pagination: Pagination::new(page, limit, total.0),
    })
}

/// Idempotent insert: a duplicate is a success with `already_present` set,
/// settled by `ON CONFLICT DO NOTHING` rather than a pre-check so two
/// racing adds both succeed with exactly one row stored.
pub async fn add_to_wishlist(
    pool: &DbPool,
    user: &AuthUser,
    payload: AddWishlistRequest,
) -> AppResult<WishlistAddResponse> {
    let product_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(payload.product_id)
        .fetch_optional(pool)
        .await?;
    if product_exists.is_none() {
        return Err(AppError::NotFound);
    }

    let inserted: Option<WishlistEntry> = sqlx::query_as(
        r#"
        INSERT INTO wishlist_items (id, user_id, product_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, product_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(payload.product_id)
    .fetch_optional(pool)
    .await?;

    let (item, already_present) = match inserted {
        Some(item) => (item, false),
        None => {
            let existing: WishlistEntry = sqlx::query_as(
                "SELECT * FROM wishlist_items WHERE user_id = $1 AND product_id = $2",
            )
            .bind(user.user_id)
            .bind(payload.product_id)
            .fetch_one(pool)
            .await?;
            (existing, true)
        }
    };

    Ok(WishlistAddResponse {
        success: true,
        already_present,
        item,
    })
}

/// Removal is idempotent too: deleting an absent entry is still a success.
pub async fn remove_from_wishlist(
    pool: &DbPool,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<WishlistRemoveResponse> {
    sqlx::query("DELETE FROM wishlist_items WHERE user_id = $1 AND product_id = $2")
        .bind(user.user_id)
        .bind(product_id)
        .execute(pool)
        .await?;

    Ok(WishlistRemoveResponse { success: true })
}
