use storefront_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.db_timeout()).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(&pool, "admin@example.com", "Store Admin", "admin").await?;
    ensure_user(&pool, "user@example.com", "Test Shopper", "user").await?;
    let category_id = ensure_category(&pool, "protein", "Protein", "Протеин").await?;
    let brand_id = ensure_brand(&pool, "ferris-nutrition", "Ferris Nutrition").await?;
    seed_products(&pool, category_id, brand_id).await?;
    seed_blog(&pool, admin_id, category_id).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    name: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn ensure_category(
    pool: &sqlx::PgPool,
    slug: &str,
    name_en: &str,
    name_ru: &str,
) -> anyhow::Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO categories (id, slug, name_en, name_ru)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (slug) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(name_en)
    .bind(name_ru)
    .execute(pool)
    .await?;

    let row: (Uuid,) = sqlx::query_as("SELECT id FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

async fn ensure_brand(pool: &sqlx::PgPool, slug: &str, name_en: &str) -> anyhow::Result<Uuid> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM brands WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    if let Some((id,)) = existing {
        return Ok(id);
    }

    let row: (Uuid,) = sqlx::query_as(
        "INSERT INTO brands (id, slug, name_en) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(slug)
    .bind(name_en)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

async fn seed_products(
    pool: &sqlx::PgPool,
    category_id: Uuid,
    brand_id: Uuid,
) -> anyhow::Result<()> {
    let products = vec![
        ("whey-isolate-2kg", "Whey Isolate 2kg", 550000, 50, true),
        ("casein-vanilla", "Casein Vanilla", 420000, 100, false),
        ("creatine-monohydrate", "Creatine Monohydrate", 150000, 200, true),
        ("bcaa-citrus", "BCAA Citrus", 250000, 75, false),
    ];

    for (slug, name, price, stock, featured) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, slug, category_id, brand_id, name_en, price, stock, is_featured, is_new)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE)
            ON CONFLICT (slug) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(slug)
        .bind(category_id)
        .bind(brand_id)
        .bind(name)
        .bind(price)
        .bind(stock)
        .bind(featured)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_blog(pool: &sqlx::PgPool, author_id: Uuid, category_id: Uuid) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO blog_posts (id, slug, title_en, body, status, author_id, category_id)
        VALUES ($1, $2, $3, $4, 'published', $5, $6)
        ON CONFLICT (slug) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("choosing-your-first-protein")
    .bind("Choosing your first protein")
    .bind("A short guide to protein powders and when to take them.")
    .bind(author_id)
    .bind(category_id)
    .execute(pool)
    .await?;

    println!("Seeded blog");
    Ok(())
}
