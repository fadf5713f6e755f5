pub mod audit_logs;
pub mod blog_posts;
pub mod brands;
pub mod categories;
pub mod order_items;
pub mod orders;
pub mod post_tags;
pub mod product_ratings;
pub mod products;
pub mod tags;
pub mod users;
pub mod wishlist_items;

pub use audit_logs::Entity as AuditLogs;
pub use blog_posts::Entity as BlogPosts;
pub use brands::Entity as Brands;
pub use categories::Entity as Categories;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use post_tags::Entity as PostTags;
pub use product_ratings::Entity as ProductRatings;
pub use products::Entity as Products;
pub use tags::Entity as Tags;
pub use users::Entity as Users;
pub use wishlist_items::Entity as WishlistItems;
