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
    db::DbPool,
    dto::posts::{CreatePostRequest, PostDetail, PostListResponse},
    entity::{
        BlogPosts, Categories, PostTags, Tags, Users,
        blog_posts::{ActiveModel as PostActive, Column, PostStatus},
        post_tags::{ActiveModel as PostTagActive, Column as PostTagCol},
    },
    error::{AppError, AppResult, is_unique_violation},
    middleware::auth::{AuthUser, ensure_admin},
    models::Post,
    response::Pagination,
    routes::params::{PostQuery, PostSortBy, SortDirection},
    sanitize,
    state::AppState,
};

pub async fn list_posts(state: &AppState, query: PostQuery) -> AppResult<PostListResponse> {
    let (page, limit, offset) = query.paging();
    let mut condition = Condition::all();

    if let Some(raw) = query.status.as_deref() {
        let status = raw
            .parse::<PostStatus>()
            .map_err(|_| AppError::BadRequest(format!("unknown post status: {raw}")))?;
        condition = condition.add(Column::Status.eq(status));
    }

    // Malformed identifier params fail open, same as the product filters.
    if let Some(category_id) = sanitize::parse_uuid_param(query.category_id.as_deref()) {
        condition = condition.add(Column::CategoryId.eq(category_id));
    }
    if let Some(author_id) = sanitize::parse_uuid_param(query.author_id.as_deref()) {
        condition = condition.add(Column::AuthorId.eq(author_id));
    }

    // Tag filtering resolves to a post-id set first. A tag with no posts
    // short-circuits: the main query is never issued.
    if let Some(tag_id) = sanitize::parse_uuid_param(query.tag_id.as_deref()) {
        let post_ids: Vec<Uuid> = PostTags::find()
            .filter(PostTagCol::TagId.eq(tag_id))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|pt| pt.post_id)
            .collect();
        if post_ids.is_empty() {
            return Ok(PostListResponse {
                posts: Vec::new(),
                pagination: Pagination::empty(page, limit),
            });
        }
        condition = condition.add(Column::Id.is_in(post_ids));
    }

    if let Some(search) = query.search.as_deref() {
        let cleaned = sanitize::clean_search(search);
        if !cleaned.is_empty() {
            let pattern = format!("%{cleaned}%");
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(Column::TitleEn).ilike(pattern.clone()))
                    .add(Expr::col(Column::TitleRu).ilike(pattern.clone()))
                    .add(Expr::col(Column::TitleAr).ilike(pattern)),
            );
        }
    }

    let sort_by = match query.sort.as_deref() {
        Some(raw) => raw.parse::<PostSortBy>()?,
        None => PostSortBy::CreatedAt,
    };
    let direction = match query.order.as_deref() {
        Some(raw) => raw.parse::<SortDirection>()?,
        None => SortDirection::Desc,
    };
    let sort_col = match sort_by {
        PostSortBy::CreatedAt => Column::CreatedAt,
        PostSortBy::Views => Column::Views,
        PostSortBy::Title => Column::TitleEn,
    };

    let mut finder = BlogPosts::find().filter(condition);
    finder = match direction {
        SortDirection::Asc => finder.order_by_asc(sort_col),
        SortDirection::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let posts = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Post::from)
        .collect();

    Ok(PostListResponse {
        posts,
        pagination: Pagination::new(page, limit, total),
    })
}

/// Fetch a published post with its author, category and tags. Reading a
/// post bumps its view counter off the request path.
pub async fn get_post_by_slug(state: &AppState, slug: &str) -> AppResult<PostDetail> {
    let post = BlogPosts::find()
        .filter(Column::Slug.eq(slug))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    // Drafts are invisible on the public read path.
    if post.status != PostStatus::Published {
        return Err(AppError::NotFound);
    }

    spawn_view_increment(state.pool.clone(), post.id);

    let author = Users::find_by_id(post.author_id)
        .one(&state.orm)
        .await?
        .map(Into::into);
    let category = match post.category_id {
        Some(id) => Categories::find_by_id(id)
            .one(&state.orm)
            .await?
            .map(Into::into),
        None => None,
    };
    let tags = post
        .find_related(Tags)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let body = post.body.clone();
    Ok(PostDetail {
        post: post.into(),
        body,
        author,
        category,
        tags,
    })
}

pub async fn create_post(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePostRequest,
) -> AppResult<Post> {
    ensure_admin(user)?;

    let slug = sanitize::clean_slug(&payload.slug);
    if slug.is_empty() {
        return Err(AppError::BadRequest("slug is required".into()));
    }
    let existing = BlogPosts::find()
        .filter(Column::Slug.eq(slug.as_str()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("duplicate slug".into()));
    }

    let txn = state.orm.begin().await?;
    let post = PostActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug),
        title_en: Set(payload.title_en),
        title_ru: Set(payload.title_ru),
        title_ar: Set(payload.title_ar),
        body: Set(payload.body),
        excerpt: Set(payload.excerpt),
        status: Set(payload.status.unwrap_or(PostStatus::Draft)),
        author_id: Set(user.user_id),
        category_id: Set(payload.category_id),
        views: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            AppError::Conflict("duplicate slug".into())
        } else {
            AppError::from(err)
        }
    })?;

    for tag_id in payload.tag_ids {
        PostTagActive {
            post_id: Set(post.id),
            tag_id: Set(tag_id),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "post_create",
        Some("blog_posts"),
        Some(serde_json::json!({ "post_id": post.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(post.into())
}

/// Two-step delete: tag relation rows first, then the post, so no orphaned
/// join rows are left behind.
pub async fn delete_post(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<()> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    PostTags::delete_many()
        .filter(PostTagCol::PostId.eq(id))
        .exec(&txn)
        .await?;
    let result = BlogPosts::delete_by_id(id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "post_delete",
        Some("blog_posts"),
        Some(serde_json::json!({ "post_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(())
}

/// Best-effort view counter. Detached from the request path: a failure is
/// logged and swallowed, never surfaced to the reader.
fn spawn_view_increment(pool: DbPool, post_id: Uuid) {
    tokio::spawn(async move {
        let result = sqlx::query("UPDATE blog_posts SET views = views + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&pool)
            .await;
        if let Err(err) = result {
            tracing::warn!(error = %err, %post_id, "view counter increment failed");
        }
    });
}
