use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::taxonomy::{
        BrandListResponse, CategoryListResponse, CreateBrandRequest, CreateCategoryRequest,
        CreateTagRequest, TagListResponse,
    },
    entity::{
        BlogPosts, Brands, Categories, PostTags, Products, Tags,
        blog_posts::Column as PostCol,
        brands::{ActiveModel as BrandActive, Column as BrandCol},
        categories::{ActiveModel as CategoryActive, Column as CategoryCol},
        post_tags::Column as PostTagCol,
        products::Column as ProductCol,
        tags::{ActiveModel as TagActive, Column as TagCol},
    },
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Brand, Category, Tag},
    sanitize,
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<CategoryListResponse> {
    let categories = Categories::find()
        .order_by_asc(CategoryCol::NameEn)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();
    Ok(CategoryListResponse { categories })
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<Category> {
    ensure_admin(user)?;

    let slug = sanitize::clean_slug(&payload.slug);
    if slug.is_empty() {
        return Err(AppError::BadRequest("slug is required".into()));
    }
    let existing = Categories::find()
        .filter(CategoryCol::Slug.eq(slug.as_str()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("duplicate slug".into()));
    }

    let category = CategoryActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug),
        name_en: Set(payload.name_en),
        name_ru: Set(payload.name_ru),
        name_ar: Set(payload.name_ar),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::Conflict("duplicate slug".into())
        } else {
            AppError::from(err)
        }
    })?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "category_create",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(category.into())
}

/// Detach referencing products and posts before removing the category, so
/// nothing is left pointing at a missing row.
pub async fn delete_category(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    Products::update_many()
        .col_expr(ProductCol::CategoryId, Expr::value(Option::<Uuid>::None))
        .filter(ProductCol::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    BlogPosts::update_many()
        .col_expr(PostCol::CategoryId, Expr::value(Option::<Uuid>::None))
        .filter(PostCol::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    let result = Categories::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "category_delete",
        Some("categories"),
        Some(serde_json::json!({ "category_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(())
}

pub async fn list_brands(state: &AppState) -> AppResult<BrandListResponse> {
    let brands = Brands::find()
        .order_by_asc(BrandCol::NameEn)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Brand::from)
        .collect();
    Ok(BrandListResponse { brands })
}

pub async fn create_brand(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBrandRequest,
) -> AppResult<Brand> {
    ensure_admin(user)?;

    let slug = sanitize::clean_slug(&payload.slug);
    if slug.is_empty() {
        return Err(AppError::BadRequest("slug is required".into()));
    }

    let brand = BrandActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug),
        name_en: Set(payload.name_en),
        name_ru: Set(payload.name_ru),
        name_ar: Set(payload.name_ar),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(brand.into())
}

pub async fn list_tags(state: &AppState) -> AppResult<TagListResponse> {
    let tags = Tags::find()
        .order_by_asc(TagCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Tag::from)
        .collect();
    Ok(TagListResponse { tags })
}

pub async fn create_tag(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTagRequest,
) -> AppResult<Tag> {
    ensure_admin(user)?;

    let slug = sanitize::clean_slug(&payload.slug);
    if slug.is_empty() {
        return Err(AppError::BadRequest("slug is required".into()));
    }
    let existing = Tags::find()
        .filter(TagCol::Slug.eq(slug.as_str()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("duplicate slug".into()));
    }

    let tag = TagActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug),
        name: Set(payload.name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::Conflict("duplicate slug".into())
        } else {
            AppError::from(err)
        }
    })?;

    Ok(tag.into())
}

/// Join rows first, then the tag itself.
pub async fn delete_tag(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    PostTags::delete_many()
        .filter(PostTagCol::TagId.eq(id))
        .exec(&txn)
        .await?;
    let result = Tags::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    Ok(())
}
