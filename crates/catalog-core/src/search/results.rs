//! Result pages and pagination.

use crate::product::Product;
use serde::{Deserialize, Serialize};

/// Pagination bounds for the displayed listing.
///
/// Always satisfies `1 <= page <= total_pages`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Total number of pages, at least 1.
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination info, clamping into range.
    pub fn new(page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
        }
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether there's a previous page.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// The next page number, if any.
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }

    /// The previous page number, if any.
    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    /// "Page X of Y".
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// One page of listing results, replaced wholesale on every response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "ListingResponse")]
pub struct ResultPage {
    /// The products on this page.
    pub items: Vec<Product>,
    /// Total number of pages reported by the server, at least 1.
    pub total_pages: u32,
}

/// Body of the listing endpoint as sent by the server.
#[derive(Deserialize)]
struct ListingResponse {
    #[serde(default)]
    products: Option<Vec<Product>>,
    #[serde(default)]
    pages: Option<u32>,
}

impl From<ListingResponse> for ResultPage {
    fn from(wire: ListingResponse) -> Self {
        Self::new(
            wire.products.unwrap_or_default(),
            wire.pages.unwrap_or(1),
        )
    }
}

impl ResultPage {
    /// Create a result page; a page count of 0 is treated as 1.
    pub fn new(items: Vec<Product>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages: total_pages.max(1),
        }
    }

    /// An empty single page.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 1)
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Default for ResultPage {
    fn default() -> Self {
        Self::empty()
    }
}
