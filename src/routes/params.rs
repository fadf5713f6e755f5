use std::str::FromStr;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * limit;
        (page, limit, offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(AppError::BadRequest(format!(
                "unknown sort direction: {other}"
            ))),
        }
    }
}

/// Sortable product columns. Anything outside this list is rejected rather
/// than silently falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    Name,
    Rating,
}

impl FromStr for ProductSortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "price" => Ok(Self::Price),
            "name" => Ok(Self::Name),
            "rating" => Ok(Self::Rating),
            other => Err(AppError::BadRequest(format!("unknown sort field: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortBy {
    CreatedAt,
    Views,
    Title,
}

impl FromStr for PostSortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created_at" => Ok(Self::CreatedAt),
            "views" => Ok(Self::Views),
            "title" => Ok(Self::Title),
            other => Err(AppError::BadRequest(format!("unknown sort field: {other}"))),
        }
    }
}

/// `GET /api/products` query string. Page fields are inlined rather than
/// flattened: serde_urlencoded cannot deserialize numbers through flatten.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Category slug; dropped when it does not resolve.
    pub category: Option<String>,
    /// Brand identifier; dropped when not a canonical UUID.
    pub brand: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<i64>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<i64>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub featured: Option<bool>,
    #[serde(rename = "new")]
    pub is_new: Option<bool>,
}

impl ProductQuery {
    pub fn paging(&self) -> (i64, i64, i64) {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
        .normalize()
    }
}

/// `GET /api/blog/posts` query string.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PostQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub category_id: Option<String>,
    pub tag_id: Option<String>,
    pub author_id: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl PostQuery {
    pub fn paging(&self) -> (i64, i64, i64) {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
        .normalize()
    }
}

/// `GET /api/admin/orders` query string.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub order: Option<String>,
}

impl OrderListQuery {
    pub fn paging(&self) -> (i64, i64, i64) {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_defaults_and_clamps() {
        let (page, limit, offset) = PageParams::default().normalize();
        assert_eq!((page, limit, offset), (1, 20, 0));

        let p = PageParams {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100, 0));

        let p = PageParams {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(p.normalize(), (3, 10, 20));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert!("price".parse::<ProductSortBy>().is_ok());
        assert!("password_hash".parse::<ProductSortBy>().is_err());
        assert!("views".parse::<PostSortBy>().is_ok());
        assert!("body".parse::<PostSortBy>().is_err());
        assert!("asc".parse::<SortDirection>().is_ok());
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
