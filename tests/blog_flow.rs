use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, Statement};
use std::time::Duration;
use uuid::Uuid;

use storefront_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::posts::CreatePostRequest,
    entity::{
        PostTags,
        blog_posts::PostStatus,
        post_tags::Column as PostTagCol,
        tags::ActiveModel as TagActive,
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::PostQuery,
    services::blog_service,
    state::AppState,
};

// Blog flow: status filtering, tag resolution, slug conflicts, draft
// invisibility, detached view counting, relation-row cleanup on delete.
#[tokio::test]
async fn blog_posting_and_reading_flow() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let author_id = create_user(&state, "admin", "author@example.com").await?;
    let admin = AuthUser {
        user_id: author_id,
        role: "admin".into(),
    };

    let tag = TagActive {
        id: Set(Uuid::new_v4()),
        slug: Set("nutrition".into()),
        name: Set("Nutrition".into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let published = blog_service::create_post(
        &state,
        &admin,
        CreatePostRequest {
            slug: "protein-guide".into(),
            title_en: "Protein guide".into(),
            title_ru: "Гид по протеину".into(),
            title_ar: String::new(),
            body: "Long form content.".into(),
            excerpt: Some("Short intro".into()),
            status: Some(PostStatus::Published),
            category_id: None,
            tag_ids: vec![tag.id],
        },
    )
    .await?;

    blog_service::create_post(
        &state,
        &admin,
        CreatePostRequest {
            slug: "unfinished-draft".into(),
            title_en: "Unfinished draft".into(),
            title_ru: String::new(),
            title_ar: String::new(),
            body: "wip".into(),
            excerpt: None,
            status: None,
            category_id: None,
            tag_ids: vec![],
        },
    )
    .await?;

    // No status filter sees both; published filter narrows; unknown status
    // is rejected.
    let all = blog_service::list_posts(&state, PostQuery::default()).await?;
    assert_eq!(all.pagination.total, 2);

    let only_published = blog_service::list_posts(
        &state,
        PostQuery {
            status: Some("published".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(only_published.pagination.total, 1);

    let bad_status = blog_service::list_posts(
        &state,
        PostQuery {
            status: Some("archived".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(bad_status, Err(AppError::BadRequest(_))));

    // Tag filter goes through the post-id set.
    let tagged = blog_service::list_posts(
        &state,
        PostQuery {
            tag_id: Some(tag.id.to_string()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(tagged.pagination.total, 1);
    assert_eq!(tagged.posts[0].id, published.id);

    // Localized title search.
    let searched = blog_service::list_posts(
        &state,
        PostQuery {
            search: Some("гид".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(searched.pagination.total, 1);

    // Published detail resolves with author and tags; drafts stay hidden.
    let detail = blog_service::get_post_by_slug(&state, "protein-guide").await?;
    assert_eq!(detail.post.slug, "protein-guide");
    assert!(detail.author.is_some());
    assert_eq!(detail.tags.len(), 1);
    assert_eq!(detail.body, "Long form content.");

    let draft = blog_service::get_post_by_slug(&state, "unfinished-draft").await;
    assert!(matches!(draft, Err(AppError::NotFound)));

    // The view counter catches up off the request path.
    blog_service::get_post_by_slug(&state, "protein-guide").await?;
    let mut views = 0;
    for _ in 0..50 {
        let post = storefront_api::entity::BlogPosts::find_by_id(published.id)
            .one(&state.orm)
            .await?
            .unwrap();
        views = post.views;
        if views >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(views >= 2, "expected detached view increments to land");

    // Duplicate slug is a conflict.
    let dup = blog_service::create_post(
        &state,
        &admin,
        CreatePostRequest {
            slug: "protein-guide".into(),
            title_en: "Another guide".into(),
            title_ru: String::new(),
            title_ar: String::new(),
            body: "body".into(),
            excerpt: None,
            status: None,
            category_id: None,
            tag_ids: vec![],
        },
    )
    .await;
    assert!(matches!(dup, Err(AppError::Conflict(_))));

    // Deleting a post removes its tag relation rows first.
    blog_service::delete_post(&state, &admin, published.id).await?;
    let orphaned = PostTags::find()
        .filter(PostTagCol::PostId.eq(published.id))
        .count(&state.orm)
        .await?;
    assert_eq!(orphaned, 0);

    Ok(())
}

async fn setup_state() -> anyhow::Result<Option<AppState>> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(None);
            }
        };

    let timeout = Duration::from_secs(5);
    let pool = create_pool(&database_url, timeout).await?;
    let orm = create_orm_conn(&database_url, timeout).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, post_tags, blog_posts, tags, product_ratings, wishlist_items, audit_logs, products, brands, categories, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(Some(AppState { pool, orm }))
}

async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        name: Set("Author".into()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}
