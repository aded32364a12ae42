//! Pagination utilities for the paper store

/// Sanitized pagination parameters plus the derived SQL offset
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: i64,
    /// Rows per page
    pub page_size: i64,
    /// Offset for SQL LIMIT/OFFSET query
    pub offset: i64,
}

/// Clamp requested pagination to valid values and compute the offset.
///
/// Malformed input self-heals (page and page_size are floored at 1)
/// rather than erroring; a page past the end of the result set simply
/// yields an empty slice from the LIMIT/OFFSET query.
pub fn sanitize(requested_page: i64, requested_page_size: i64) -> Pagination {
    let page = requested_page.max(1);
    let page_size = requested_page_size.max(1);
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        page_size,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_page() {
        let p = sanitize(3, 10);
        assert_eq!(p.page, 3);
        assert_eq!(p.page_size, 10);
        assert_eq!(p.offset, 20);
    }

    #[test]
    fn test_first_page() {
        let p = sanitize(1, 25);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_page_clamped_low() {
        let p = sanitize(0, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);

        let p = sanitize(-7, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_page_size_clamped_low() {
        let p = sanitize(2, 0);
        assert_eq!(p.page_size, 1);
        assert_eq!(p.offset, 1);

        let p = sanitize(1, -3);
        assert_eq!(p.page_size, 1);
    }

    #[test]
    fn test_high_page_not_clamped() {
        // Out-of-range pages are allowed; the query returns no rows
        let p = sanitize(99, 10);
        assert_eq!(p.page, 99);
        assert_eq!(p.offset, 980);
    }
}
