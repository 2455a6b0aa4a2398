//! Product catalog domain types.
//!
//! This crate holds the types shared by the catalog client, the listing
//! controller and the CLI:
//!
//! - **Products**: `Product` records and the validated `ProductDraft` payload
//! - **Search**: `ListingQuery`, `SortKey`, `ResultPage`, `Pagination`
//! - **Prices**: parsing user price input and formatting for display
//! - **Notices**: transient user-facing messages
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_core::prelude::*;
//!
//! let mut query = ListingQuery::new();
//! query.set_search_text("chair");
//! query.set_sort(SortKey::PriceAsc);
//!
//! // search=chair&page=1&limit=12&sort=price_asc
//! let params = query.to_params();
//! ```

pub mod error;
pub mod ids;
pub mod notice;
pub mod price;
pub mod product;
pub mod search;

pub use error::{CatalogError, FieldError, ValidationErrors};
pub use ids::ProductId;
pub use notice::{Notice, NoticeLevel};
pub use price::{format_price, parse_price_input};
pub use product::{Product, ProductDraft, ProductForm};
pub use search::{ListingQuery, Pagination, ResultPage, SortKey, PAGE_SIZE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, FieldError, ValidationErrors};
    pub use crate::ids::ProductId;
    pub use crate::notice::{Notice, NoticeLevel};
    pub use crate::price::{format_price, parse_price_input};
    pub use crate::product::{Product, ProductDraft, ProductForm};
    pub use crate::search::{ListingQuery, Pagination, ResultPage, SortKey, PAGE_SIZE};
}
