//! Search module.
//!
//! Contains the listing query, sort keys, result pages and pagination.

mod query;
mod results;

pub use query::{ListingQuery, SortKey, PAGE_SIZE};
pub use results::{Pagination, ResultPage};
