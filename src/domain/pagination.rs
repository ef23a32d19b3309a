//! Offset/limit arithmetic for listing orders out of the id index.

/// A caller's window into the index: skip `offset` entries, return up to `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

impl PageRequest {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Inclusive rank range `[offset, end]` to read from an index holding
    /// `total` entries, or `None` when the window selects nothing.
    pub fn rank_range(&self, total: u64) -> Option<(u64, u64)> {
        if total == 0 || self.limit == 0 || self.offset >= total {
            return None;
        }
        let end = self
            .offset
            .saturating_add(self.limit - 1)
            .min(total - 1);
        Some((self.offset, end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Page numbers are 1-based and a partial last page counts as a page.
    /// A zero limit yields `page = 1`, `total_pages = 0` instead of dividing.
    pub fn new(total: u64, request: PageRequest) -> Self {
        let (page, total_pages) = if total == 0 || request.limit == 0 {
            (1, 0)
        } else {
            (
                request.offset / request.limit + 1,
                total.div_ceil(request.limit),
            )
        };
        Self {
            total,
            limit: request.limit,
            offset: request.offset,
            page,
            total_pages,
        }
    }
}
