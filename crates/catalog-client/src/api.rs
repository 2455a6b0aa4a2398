//! The listing seam.

use crate::{CatalogClient, FetchError};
use async_trait::async_trait;
use catalog_core::{ListingQuery, ResultPage};

/// Source of listing pages.
///
/// The listing controller only ever needs this one call; tests substitute a
/// scripted implementation.
#[async_trait]
pub trait ProductListing: Send + Sync + 'static {
    /// Fetch one page of products for `query`.
    async fn list_products(&self, query: &ListingQuery) -> Result<ResultPage, FetchError>;
}

#[async_trait]
impl ProductListing for CatalogClient {
    async fn list_products(&self, query: &ListingQuery) -> Result<ResultPage, FetchError> {
        CatalogClient::list_products(self, query).await
    }
}
