use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        orders::{
            OrderConfirmation, OrderListResponse, OrderSummary, OrderWithItems,
            UpdateOrderStatusRequest, UpdatePaymentStatusRequest,
        },
        posts::{CreatePostRequest, PostDetail, PostListResponse},
        products::{CreateProductRequest, ProductDetail, ProductListResponse, UpdateProductRequest},
        ratings::CreateRatingRequest,
        taxonomy::{
            BrandListResponse, CategoryListResponse, CreateBrandRequest, CreateCategoryRequest,
            CreateTagRequest, TagListResponse,
        },
        wishlist::{
            AddWishlistRequest, WishlistAddResponse, WishlistListResponse, WishlistRemoveResponse,
        },
    },
    entity::{
        blog_posts::PostStatus,
        orders::{OrderStatus, PaymentStatus},
    },
    models::{Author, Brand, Category, Order, OrderItem, Post, Product, Rating, Tag, WishlistEntry},
    response::Pagination,
    routes::{admin, blog, health, orders, products, ratings, taxonomy, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        blog::list_posts,
        blog::get_post,
        blog::create_post,
        blog::delete_post,
        orders::place_order,
        ratings::create_rating,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        taxonomy::list_categories,
        taxonomy::create_category,
        taxonomy::delete_category,
        taxonomy::list_brands,
        taxonomy::create_brand,
        taxonomy::list_tags,
        taxonomy::create_tag,
        taxonomy::delete_tag,
        admin::list_all_orders,
        admin::get_order_admin,
        admin::update_order_status,
        admin::update_payment_status
    ),
    components(
        schemas(
            Product,
            Category,
            Brand,
            Tag,
            Rating,
            WishlistEntry,
            Order,
            OrderItem,
            Post,
            Author,
            OrderStatus,
            PaymentStatus,
            PostStatus,
            Pagination,
            ProductListResponse,
            ProductDetail,
            CreateProductRequest,
            UpdateProductRequest,
            PostListResponse,
            PostDetail,
            CreatePostRequest,
            OrderConfirmation,
            OrderSummary,
            OrderListResponse,
            OrderWithItems,
            UpdateOrderStatusRequest,
            UpdatePaymentStatusRequest,
            CreateRatingRequest,
            AddWishlistRequest,
            WishlistAddResponse,
            WishlistRemoveResponse,
            WishlistListResponse,
            CategoryListResponse,
            BrandListResponse,
            TagListResponse,
            CreateCategoryRequest,
            CreateBrandRequest,
            CreateTagRequest,
            health::Health
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Blog", description = "Blog endpoints"),
        (name = "Orders", description = "Checkout endpoints"),
        (name = "Ratings", description = "Product rating endpoints"),
        (name = "Wishlist", description = "Wishlist endpoints"),
        (name = "Taxonomy", description = "Category, brand and tag endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
