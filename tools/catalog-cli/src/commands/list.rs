//! One-shot product listing.

use anyhow::{anyhow, bail, Result};
use catalog_client::FetchError;
use catalog_core::Pagination;

use super::ListArgs;
use crate::context::Context;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let query = args.filters.to_query()?.with_page(args.page);
    let client = ctx.client()?;

    let spinner = ctx.output.spinner("Loading products...");
    let result = client.list_products(&query).await;
    spinner.finish_and_clear();

    let page = result.map_err(|e| fetch_failure(&e, client.base_url()))?;
    let pagination = requested_page(query.page, page.total_pages)?;
    ctx.output.product_page(&page.items, &pagination);

    Ok(())
}

fn fetch_failure(err: &FetchError, base_url: &str) -> anyhow::Error {
    if err.is_network() {
        anyhow!(
            "Error fetching products: could not reach {} ({})",
            base_url,
            err.user_message()
        )
    } else {
        anyhow!("Error fetching products: {}", err.user_message())
    }
}

/// Pagination for the page that was asked for; pages past the end are an error.
fn requested_page(page: u32, total_pages: u32) -> Result<Pagination> {
    let pagination = Pagination::new(page, total_pages);
    if pagination.page != page {
        bail!(
            "Page {} is out of range: the listing has {} page(s)",
            page,
            pagination.total_pages
        );
    }
    Ok(pagination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_page_within_range() {
        let pagination = requested_page(2, 3).unwrap();
        assert_eq!(pagination.label(), "Page 2 of 3");
    }

    #[test]
    fn test_requested_page_past_end() {
        let err = requested_page(5, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Page 5 is out of range: the listing has 3 page(s)"
        );
        assert!(requested_page(0, 3).is_err());
    }

    #[test]
    fn test_network_failure_names_the_api() {
        let offline = FetchError::Request("connection refused".into());
        let message = fetch_failure(&offline, "http://localhost:5000/api").to_string();
        assert!(message.contains("could not reach http://localhost:5000/api"));

        let rejected = FetchError::Http {
            status: 500,
            message: "database down".into(),
        };
        assert_eq!(
            fetch_failure(&rejected, "http://x/api").to_string(),
            "Error fetching products: database down"
        );
    }
}
