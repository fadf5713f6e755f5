use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, Statement};
use std::time::Duration;
use uuid::Uuid;

use storefront_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::orders::{OrderItemInput, PlaceOrderRequest, UpdateOrderStatusRequest},
    dto::ratings::CreateRatingRequest,
    dto::wishlist::AddWishlistRequest,
    entity::{
        Products,
        products::ActiveModel as ProductActive,
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::PageParams,
    services::{admin_service, order_service, rating_service, wishlist_service},
    state::AppState,
};

// Checkout flow: server-side price snapshots, atomic header+items write,
// rating uniqueness, wishlist idempotency, admin status transitions.
#[tokio::test]
async fn place_order_rating_and_wishlist_flow() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let user_id = create_user(&state, "user", "shopper@example.com").await?;
    let product_id = create_product(&state, "test-widget", 1000).await?;

    // Client-supplied prices and totals are ignored; subtotals come from
    // the stored product price.
    let confirmation = order_service::place_order(
        &state,
        PlaceOrderRequest {
            items: vec![OrderItemInput {
                product_id,
                quantity: 2,
                price: Some(1),
            }],
            customer_name: "Test Shopper".into(),
            customer_email: "shopper@example.com".into(),
            customer_phone: "+100000000".into(),
            shipping_address: "Somewhere 1".into(),
            payment_method: "cash".into(),
            total_amount: Some(1),
        },
    )
    .await?;
    assert!(confirmation.success);
    assert!(confirmation.order.order_number.starts_with("ORD-"));

    let admin = AuthUser {
        user_id: Uuid::new_v4(),
        role: "admin".into(),
    };
    let stored = admin_service::get_order(&state, &admin, confirmation.order.id).await?;
    assert_eq!(stored.order.total_amount, 2000);
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].unit_price, 1000);
    assert_eq!(stored.items[0].subtotal, 2000);

    // An empty cart never reaches the store.
    let empty = order_service::place_order(
        &state,
        PlaceOrderRequest {
            items: vec![],
            customer_name: "x".into(),
            customer_email: "x@example.com".into(),
            customer_phone: "1".into(),
            shipping_address: "x".into(),
            payment_method: "cash".into(),
            total_amount: None,
        },
    )
    .await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    // Missing contact fields are rejected up front.
    let no_email = order_service::place_order(
        &state,
        PlaceOrderRequest {
            items: vec![OrderItemInput {
                product_id,
                quantity: 1,
                price: None,
            }],
            customer_name: "x".into(),
            customer_email: "  ".into(),
            customer_phone: "1".into(),
            shipping_address: "x".into(),
            payment_method: "cash".into(),
            total_amount: None,
        },
    )
    .await;
    assert!(matches!(no_email, Err(AppError::BadRequest(_))));

    // Admin-only status transition, with the allow-list enforced.
    let shopper = AuthUser {
        user_id,
        role: "user".into(),
    };
    let forbidden = admin_service::update_order_status(
        &state,
        &shopper,
        confirmation.order.id,
        UpdateOrderStatusRequest {
            status: "processing".into(),
        },
    )
    .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    let updated = admin_service::update_order_status(
        &state,
        &admin,
        confirmation.order.id,
        UpdateOrderStatusRequest {
            status: "processing".into(),
        },
    )
    .await?;
    assert_eq!(
        serde_json::to_value(&updated.status)?,
        serde_json::json!("processing")
    );

    let bad_status = admin_service::update_order_status(
        &state,
        &admin,
        confirmation.order.id,
        UpdateOrderStatusRequest {
            status: "teleported".into(),
        },
    )
    .await;
    assert!(matches!(bad_status, Err(AppError::BadRequest(_))));

    // First rating lands and refreshes the product aggregate.
    let rating = rating_service::create_rating(
        &state,
        &shopper,
        CreateRatingRequest {
            product_id,
            rating: 4,
        },
    )
    .await?;
    assert_eq!(rating.rating, 4);

    let product = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .unwrap();
    assert_eq!(product.review_count, 1);
    assert!((product.rating_avg - 4.0).abs() < f64::EPSILON);

    // A second rating from the same user is a conflict and the stored
    // value is unchanged.
    let again = rating_service::create_rating(
        &state,
        &shopper,
        CreateRatingRequest {
            product_id,
            rating: 1,
        },
    )
    .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));

    use storefront_api::entity::{ProductRatings, product_ratings::Column as RatingCol};
    let stored_rating = ProductRatings::find()
        .filter(RatingCol::ProductId.eq(product_id))
        .filter(RatingCol::UserId.eq(user_id))
        .one(&state.orm)
        .await?
        .unwrap();
    assert_eq!(stored_rating.rating, 4);

    // Out-of-range ratings never reach the store.
    let out_of_range = rating_service::create_rating(
        &state,
        &shopper,
        CreateRatingRequest {
            product_id,
            rating: 6,
        },
    )
    .await;
    assert!(matches!(out_of_range, Err(AppError::BadRequest(_))));

    // Two consecutive wishlist adds both succeed and leave one row.
    let first = wishlist_service::add_to_wishlist(
        &state.pool,
        &shopper,
        AddWishlistRequest { product_id },
    )
    .await?;
    assert!(first.success);
    assert!(!first.already_present);

    let second = wishlist_service::add_to_wishlist(
        &state.pool,
        &shopper,
        AddWishlistRequest { product_id },
    )
    .await?;
    assert!(second.success);
    assert!(second.already_present);
    assert_eq!(first.item.id, second.item.id);

    let listed = wishlist_service::list_wishlist(&state.pool, &shopper, PageParams::default())
        .await?;
    assert_eq!(listed.pagination.total, 1);
    assert_eq!(listed.products.len(), 1);

    // Removal is idempotent: removing twice is still a success.
    let removed = wishlist_service::remove_from_wishlist(&state.pool, &shopper, product_id).await?;
    assert!(removed.success);
    let removed_again =
        wishlist_service::remove_from_wishlist(&state.pool, &shopper, product_id).await?;
    assert!(removed_again.success);

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
        name: Set("Test".into()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

async fn create_product(state: &AppState, slug: &str, price: i64) -> anyhow::Result<Uuid> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        slug: Set(slug.into()),
        category_id: Set(None),
        brand_id: Set(None),
        name_en: Set(slug.replace('-', " ")),
        name_ru: Set(String::new()),
        name_ar: Set(String::new()),
        description: Set(None),
        price: Set(price),
        discount_price: Set(None),
        stock: Set(10),
        is_featured: Set(false),
        is_new: Set(false),
        rating_avg: Set(0.0),
        review_count: Set(0),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(product.id)
}
