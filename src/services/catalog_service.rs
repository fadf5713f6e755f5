use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::products::{CreateProductRequest, ProductDetail, ProductListResponse, UpdateProductRequest},
    entity::{
        Brands, Categories, ProductRatings, Products, WishlistItems,
        categories::Column as CategoryCol,
        product_ratings::Column as RatingCol,
        products::{ActiveModel as ProductActive, Column},
        wishlist_items::Column as WishlistCol,
    },
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    response::Pagination,
    routes::params::{ProductQuery, ProductSortBy, SortDirection},
    sanitize,
    state::AppState,
};

pub async fn list_products(state: &AppState, query: ProductQuery) -> AppResult<ProductListResponse> {
    let (page, limit, offset) = query.paging();
    let mut condition = Condition::all();

    // Unresolvable category slugs and malformed brand ids fail open: the
    // filter is dropped and the rest of the predicate set still applies.
    if let Some(category_id) = resolve_category_slug(state, query.category.as_deref()).await? {
        condition = condition.add(Column::CategoryId.eq(category_id));
    }

    if let Some(brand_id) = sanitize::parse_uuid_param(query.brand.as_deref()) {
        condition = condition.add(Column::BrandId.eq(brand_id));
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    if let Some(featured) = query.featured {
        condition = condition.add(Column::IsFeatured.eq(featured));
    }

    if let Some(is_new) = query.is_new {
        condition = condition.add(Column::IsNew.eq(is_new));
    }

    if let Some(search) = query.search.as_deref() {
        let cleaned = sanitize::clean_search(search);
        if !cleaned.is_empty() {
            let pattern = format!("%{cleaned}%");
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(Column::NameEn).ilike(pattern.clone()))
                    .add(Expr::col(Column::NameRu).ilike(pattern.clone()))
                    .add(Expr::col(Column::NameAr).ilike(pattern)),
            );
        }
    }

    let sort_by = match query.sort.as_deref() {
        Some(raw) => raw.parse::<ProductSortBy>()?,
        None => ProductSortBy::CreatedAt,
    };
    let direction = match query.order.as_deref() {
        Some(raw) => raw.parse::<SortDirection>()?,
        None => SortDirection::Desc,
    };
    let sort_col = match sort_by {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::NameEn,
        ProductSortBy::Rating => Column::RatingAvg,
    };

    let mut finder = Products::find().filter(condition);
    finder = match direction {
        SortDirection::Asc => finder.order_by_asc(sort_col),
        SortDirection::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let products = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(ProductListResponse {
        products,
        pagination: Pagination::new(page, limit, total),
    })
}

pub async fn get_product_by_slug(state: &AppState, slug: &str) -> AppResult<ProductDetail> {
    let product = Products::find()
        .filter(Column::Slug.eq(slug))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let category = match product.category_id {
        Some(id) => Categories::find_by_id(id)
            .one(&state.orm)
            .await?
            .map(Into::into),
        None => None,
    };
    let brand = match product.brand_id {
        Some(id) => Brands::find_by_id(id).one(&state.orm).await?.map(Into::into),
        None => None,
    };
    let ratings = product
        .find_related(ProductRatings)
        .order_by_desc(RatingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(ProductDetail {
        product: product.into(),
        category,
        brand,
        ratings,
    })
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    ensure_admin(user)?;

    if payload.price <= 0 {
        return Err(AppError::BadRequest("price must be positive".into()));
    }
    if payload.stock < 0 {
        return Err(AppError::BadRequest("stock cannot be negative".into()));
    }

    let slug = sanitize::clean_slug(&payload.slug);
    if slug.is_empty() {
        return Err(AppError::BadRequest("slug is required".into()));
    }
    ensure_slug_free(state, &slug).await?;

    let active = ProductActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug),
        category_id: Set(payload.category_id),
        brand_id: Set(payload.brand_id),
        name_en: Set(payload.name_en),
        name_ru: Set(payload.name_ru),
        name_ar: Set(payload.name_ar),
        description: Set(payload.description),
        price: Set(payload.price),
        discount_price: Set(payload.discount_price),
        stock: Set(payload.stock),
        is_featured: Set(payload.is_featured),
        is_new: Set(payload.is_new),
        rating_avg: Set(0.0),
        review_count: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    };

    // The unique index is the real arbiter under concurrent creates; the
    // pre-check above only gives a friendlier fast path.
    let product = active.insert(&state.orm).await.map_err(|err| {
        if is_unique_violation(&err) {
            AppError::Conflict("duplicate slug".into())
        } else {
            err.into()
        }
    })?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(product.into())
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<Product> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ProductActive = existing.into();
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(Some(category_id));
    }
    if let Some(brand_id) = payload.brand_id {
        active.brand_id = Set(Some(brand_id));
    }
    if let Some(name_en) = payload.name_en {
        active.name_en = Set(name_en);
    }
    if let Some(name_ru) = payload.name_ru {
        active.name_ru = Set(name_ru);
    }
    if let Some(name_ar) = payload.name_ar {
        active.name_ar = Set(name_ar);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = payload.price {
        if price <= 0 {
            return Err(AppError::BadRequest("price must be positive".into()));
        }
        active.price = Set(price);
    }
    if let Some(discount_price) = payload.discount_price {
        active.discount_price = Set(Some(discount_price));
    }
    if let Some(stock) = payload.stock {
        if stock < 0 {
            return Err(AppError::BadRequest("stock cannot be negative".into()));
        }
        active.stock = Set(stock);
    }
    if let Some(is_featured) = payload.is_featured {
        active.is_featured = Set(is_featured);
    }
    if let Some(is_new) = payload.is_new {
        active.is_new = Set(is_new);
    }
    active.updated_at = Set(Utc::now().into());

    let product = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(product.into())
}

/// Deleting a product detaches its rating and wishlist references first.
/// Order items are untouched: they carry price/quantity snapshots and no
/// foreign key, so order history survives.
pub async fn delete_product(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    ProductRatings::delete_many()
        .filter(RatingCol::ProductId.eq(id))
        .exec(&txn)
        .await?;
    WishlistItems::delete_many()
        .filter(WishlistCol::ProductId.eq(id))
        .exec(&txn)
        .await?;
    let result = Products::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(())
}

/// One lookup from category slug to id. `None` means the filter should be
/// omitted: either no slug was given, it sanitized to nothing, or no such
/// category exists.
async fn resolve_category_slug(state: &AppState, raw: Option<&str>) -> AppResult<Option<Uuid>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let slug = sanitize::clean_slug(raw);
    if slug.is_empty() {
        return Ok(None);
    }
    let category = Categories::find()
        .filter(CategoryCol::Slug.eq(slug))
        .one(&state.orm)
        .await?;
    Ok(category.map(|c| c.id))
}

async fn ensure_slug_free(state: &AppState, slug: &str) -> AppResult<()> {
    let existing = Products::find()
        .filter(Column::Slug.eq(slug))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("duplicate slug".into()));
    }
    Ok(())
}
