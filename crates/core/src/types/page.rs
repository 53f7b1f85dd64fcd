//! Pagination types.
//!
//! List endpoints take a zero-based page number and a page size, and return
//! their items together with [`Paging`] metadata. The math lives here so
//! every list endpoint computes `totalPage` the same way.

use serde::{Deserialize, Serialize};

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Default page size when the caller does not specify one.
    pub const DEFAULT_SIZE: u32 = 10;

    /// Largest page size a caller may request.
    pub const MAX_SIZE: u32 = 100;

    /// Build a page request, clamping the size into `1..=MAX_SIZE`.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        let size = if size == 0 {
            Self::DEFAULT_SIZE
        } else if size > Self::MAX_SIZE {
            Self::MAX_SIZE
        } else {
            size
        };
        Self { page, size }
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Row offset of the first item on this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    /// Paging metadata for a result set of `total` rows.
    #[must_use]
    pub const fn paging(&self, total: u64) -> Paging {
        Paging {
            current_page: self.page,
            total_page: total_pages(total, self.size),
            size: self.size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// Paging metadata attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Zero-based page number of this response.
    pub current_page: u32,
    /// Total number of pages for the filtered result set.
    pub total_page: u32,
    /// Page size that produced this response.
    pub size: u32,
}

/// One page of results plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Paging metadata.
    pub paging: Paging,
}

/// Number of pages needed to hold `total` rows at `size` rows per page.
///
/// Zero rows means zero pages.
#[must_use]
pub const fn total_pages(total: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    let pages = total.div_ceil(size as u64);
    if pages > u32::MAX as u64 {
        u32::MAX
    } else {
        pages as u32
    }
}
