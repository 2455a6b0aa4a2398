//! Listing query state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Items requested per page. Fixed for every listing request.
pub const PAGE_SIZE: u32 = 12;

/// Sort options for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Server default order; no `sort` parameter is sent.
    #[default]
    None,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
}

impl SortKey {
    /// All keys in menu order.
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::NameAsc,
        SortKey::NameDesc,
    ];

    /// Value of the `sort` query parameter, `None` when no sort is applied.
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            SortKey::None => None,
            SortKey::PriceAsc => Some("price_asc"),
            SortKey::PriceDesc => Some("price_desc"),
            SortKey::NameAsc => Some("name_asc"),
            SortKey::NameDesc => Some("name_desc"),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::None => "Sort By",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::NameAsc => "Name: A-Z",
            SortKey::NameDesc => "Name: Z-A",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param().unwrap_or("none"))
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortKey::None),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "name_asc" => Ok(SortKey::NameAsc),
            "name_desc" => Ok(SortKey::NameDesc),
            other => Err(format!(
                "unknown sort key '{}' (expected one of: {})",
                other,
                SortKey::ALL.map(|key| key.to_string()).join(", ")
            )),
        }
    }
}

/// The user's current listing query.
///
/// Every filter setter resets `page` to 1; only [`ListingQuery::set_page`]
/// moves between pages. `min_price > max_price` is passed through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Free-text search, may be empty.
    pub search_text: String,
    /// Lower price bound.
    pub min_price: Option<f64>,
    /// Upper price bound.
    pub max_price: Option<f64>,
    /// Sort order.
    pub sort: SortKey,
    /// Current page (1-indexed).
    pub page: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingQuery {
    /// First page, no filters.
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            min_price: None,
            max_price: None,
            sort: SortKey::None,
            page: 1,
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
    }

    pub fn set_min_price(&mut self, min: Option<f64>) {
        self.min_price = min;
        self.page = 1;
    }

    pub fn set_max_price(&mut self, max: Option<f64>) {
        self.max_price = max;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.page = 1;
    }

    /// Move to a page without touching the filters.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Builder-style search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.set_search_text(text);
        self
    }

    /// Builder-style price range.
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self.page = 1;
        self
    }

    /// Builder-style sort.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.set_sort(sort);
        self
    }

    /// Builder-style page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.set_page(page);
        self
    }

    /// Query-string parameters for the listing endpoint.
    ///
    /// `search`, `page` and `limit` are always present; price bounds and
    /// `sort` are omitted when unset.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("search", self.search_text.clone()),
            ("page", self.page.to_string()),
            ("limit", PAGE_SIZE.to_string()),
        ];

        if let Some(min) = self.min_price {
            params.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("maxPrice", max.to_string()));
        }
        if let Some(sort) = self.sort.as_param() {
            params.push(("sort", sort.to_string()));
        }

        params
    }
}
