//! Offset/limit windowing over a table.

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not ask for one (or asks for a non-positive size).
pub const DEFAULT_PER_PAGE: i64 = 10;

/// A normalized page request. `page >= 1` and `per_page >= 1` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    /// Clamps `page` to at least 1. A non-positive `per_page` falls back to
    /// the default; there is no upper bound.
    pub fn new(page: i64, per_page: i64) -> Self {
        let per_page = if per_page < 1 {
            DEFAULT_PER_PAGE
        } else {
            per_page
        };
        Self {
            page: page.max(1),
            per_page,
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Rows to skip: `(page - 1) * per_page`, saturating on overflow.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Maximum rows to return.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PER_PAGE)
    }
}

/// Number of pages needed to hold `total` rows, `per_page` at a time.
///
/// `per_page` must be positive.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    let pages = total / per_page;
    if total % per_page != 0 { pages + 1 } else { pages }
}

/// One window of rows plus the metadata describing where it sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            per_page: request.per_page(),
            current_page: request.page(),
            total_pages: total_pages(total, request.per_page()),
        }
    }

    /// Converts the items while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }
}
