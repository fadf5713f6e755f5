use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::ratings::CreateRatingRequest,
    entity::{
        ProductRatings, Products,
        product_ratings::{ActiveModel as RatingActive, Column},
        products::ActiveModel as ProductActive,
    },
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::AuthUser,
    models::Rating,
    state::AppState,
};

/// One rating per (product, user); there is no update path. The pre-check
/// gives the friendly rejection, the unique index settles races.
pub async fn create_rating(
    state: &AppState,
    user: &AuthUser,
    payload: CreateRatingRequest,
) -> AppResult<Rating> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest("rating must be between 1 and 5".into()));
    }

    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let existing = ProductRatings::find()
        .filter(
            Condition::all()
                .add(Column::ProductId.eq(payload.product_id))
                .add(Column::UserId.eq(user.user_id)),
        )
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("already rated".into()));
    }

    let txn = state.orm.begin().await?;

    let rating = RatingActive {
        id: Set(Uuid::new_v4()),
        product_id: Set(payload.product_id),
        user_id: Set(user.user_id),
        rating: Set(payload.rating),
        created_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::Conflict("already rated".into())
        } else {
            AppError::from(err)
        }
    })?;

    // Refresh the denormalized aggregate on the product row.
    let all = ProductRatings::find()
        .filter(Column::ProductId.eq(payload.product_id))
        .all(&txn)
        .await?;
    let count = all.len() as i32;
    let avg = if count > 0 {
        all.iter().map(|r| r.rating as f64).sum::<f64>() / count as f64
    } else {
        0.0
    };

    let mut active: ProductActive = product.into();
    active.rating_avg = Set(avg);
    active.review_count = Set(count);
    active.update(&txn).await?;

    txn.commit().await?;

    Ok(rating.into())
}
