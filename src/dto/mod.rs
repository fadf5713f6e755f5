pub mod orders;
pub mod posts;
pub mod products;
pub mod ratings;
pub mod taxonomy;
pub mod wishlist;
