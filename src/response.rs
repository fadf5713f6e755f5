use serde::Serialize;
use utoipa::ToSchema;

/// Pagination envelope attached to every list response.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }

    /// The envelope for a short-circuited query that matched nothing.
    pub fn empty(page: i64, limit: i64) -> Self {
        Self::new(page, limit, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(1, 3, 7).total_pages, 3);
    }

    #[test]
    fn empty_envelope_has_zero_totals() {
        let p = Pagination::empty(2, 20);
        assert_eq!(p.total, 0);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.page, 2);
    }
}
