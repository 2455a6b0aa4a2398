//! Listing state, independent of timers and I/O.

use crate::sequence::RequestSequence;
use catalog_client::FetchError;
use catalog_core::{ListingQuery, Pagination, Product, ProductId, ResultPage, SortKey};

/// Which of the three mutually exclusive views to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// A request is in flight.
    Loading,
    /// Nothing to show.
    Empty,
    /// At least one product.
    Populated,
}

/// Immutable view of the listing, published after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub query: ListingQuery,
    pub items: Vec<Product>,
    pub pagination: Pagination,
    pub loading: bool,
}

impl ListingSnapshot {
    pub fn display_state(&self) -> DisplayState {
        if self.loading {
            DisplayState::Loading
        } else if self.items.is_empty() {
            DisplayState::Empty
        } else {
            DisplayState::Populated
        }
    }

    pub fn can_next(&self) -> bool {
        self.pagination.has_next()
    }

    pub fn can_previous(&self) -> bool {
        self.pagination.has_previous()
    }
}

/// Outcome of applying a response.
#[derive(Debug)]
pub enum Applied {
    /// A newer request was issued; nothing changed.
    Stale,
    /// Items and page count replaced.
    Success,
    /// Loading cleared, items kept.
    Failed(FetchError),
}

/// The controller's mutable state.
#[derive(Debug)]
pub struct ListingState {
    query: ListingQuery,
    items: Vec<Product>,
    total_pages: u32,
    loading: bool,
    sequence: RequestSequence,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingState {
    /// First page, no filters, nothing loaded.
    pub fn new() -> Self {
        Self {
            query: ListingQuery::new(),
            items: Vec::new(),
            total_pages: 1,
            loading: false,
            sequence: RequestSequence::new(),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.query.page, self.total_pages)
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.set_search_text(text);
    }

    pub fn set_min_price(&mut self, min: Option<f64>) {
        self.query.set_min_price(min);
    }

    pub fn set_max_price(&mut self, max: Option<f64>) {
        self.query.set_max_price(max);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.set_sort(sort);
    }

    /// Advance one page. Returns false at the last page.
    pub fn next_page(&mut self) -> bool {
        match self.pagination().next() {
            Some(page) => {
                self.query.set_page(page);
                true
            }
            None => false,
        }
    }

    /// Go back one page. Returns false on page 1.
    pub fn previous_page(&mut self) -> bool {
        match self.pagination().previous() {
            Some(page) => {
                self.query.set_page(page);
                true
            }
            None => false,
        }
    }

    /// Start a request for the current query, superseding any other.
    pub fn begin_request(&mut self) -> (u64, ListingQuery) {
        self.loading = true;
        (self.sequence.issue(), self.query.clone())
    }

    /// Give up on the request in flight, if any.
    ///
    /// Its response becomes stale. `loading` stays set until the replacement
    /// query resolves. Returns whether a request was superseded.
    pub fn supersede(&mut self) -> bool {
        if !self.loading {
            return false;
        }
        self.sequence.issue();
        true
    }

    /// Apply the response to request `seq`.
    pub fn apply(&mut self, seq: u64, result: Result<ResultPage, FetchError>) -> Applied {
        if !self.sequence.is_current(seq) {
            return Applied::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.items = page.items;
                self.total_pages = page.total_pages.max(1);
                if self.query.page > self.total_pages {
                    self.query.set_page(self.total_pages);
                }
                Applied::Success
            }
            Err(err) => Applied::Failed(err),
        }
    }

    /// Drop a deleted product from the displayed items.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|product| &product.id != id);
        self.items.len() != before
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        ListingSnapshot {
            query: self.query.clone(),
            items: self.items.clone(),
            pagination: self.pagination(),
            loading: self.loading,
        }
    }
}
