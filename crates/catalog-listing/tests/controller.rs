//! Controller behaviour under paused time.

use async_trait::async_trait;
use catalog_client::{FetchError, ProductListing};
use catalog_core::{ListingQuery, NoticeLevel, Product, ProductId, ResultPage, SortKey};
use catalog_listing::{
    DisplayState, ListingConfig, ListingController, ListingHandle, NoticeReceiver,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// One scripted reply: wait `delay`, then return `result`.
struct Reply {
    delay: Duration,
    result: Result<ResultPage, FetchError>,
}

/// In-memory listing that records every query and replays a script.
///
/// Calls beyond the script get an empty single page immediately.
#[derive(Default)]
struct ScriptedListing {
    calls: Mutex<Vec<ListingQuery>>,
    script: Mutex<VecDeque<Reply>>,
}

impl ScriptedListing {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn reply(&self, delay_ms: u64, result: Result<ResultPage, FetchError>) -> &Self {
        self.script.lock().unwrap().push_back(Reply {
            delay: Duration::from_millis(delay_ms),
            result,
        });
        self
    }

    fn ok(&self, delay_ms: u64, items: usize, pages: u32) -> &Self {
        self.reply(delay_ms, Ok(ResultPage::new(products("p", items), pages)))
    }

    fn calls(&self) -> Vec<ListingQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductListing for ScriptedListing {
    async fn list_products(&self, query: &ListingQuery) -> Result<ResultPage, FetchError> {
        self.calls.lock().unwrap().push(query.clone());
        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            Some(Reply { delay, result }) => {
                sleep(delay).await;
                result
            }
            None => Ok(ResultPage::empty()),
        }
    }
}

fn products(prefix: &str, n: usize) -> Vec<Product> {
    (1..=n)
        .map(|i| {
            Product::new(
                format!("{}{}", prefix, i),
                format!("Item {}", i),
                250.0 * i as f64,
                format!("https://img.example/{}{}.png", prefix, i),
            )
        })
        .collect()
}

fn start(listing: &Arc<ScriptedListing>, load_on_start: bool) -> (ListingHandle, NoticeReceiver) {
    ListingController::spawn(
        Arc::clone(listing),
        ListingConfig {
            load_on_start,
            ..ListingConfig::default()
        },
    )
}

async fn settle() {
    sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn initial_load_populates_first_page() {
    let listing = ScriptedListing::new();
    listing.ok(30, 12, 3);

    let (handle, _notices) = start(&listing, true);
    settle().await;
    assert_eq!(handle.snapshot().display_state(), DisplayState::Loading);

    sleep(Duration::from_millis(50)).await;
    let snap = handle.snapshot();
    assert_eq!(snap.display_state(), DisplayState::Populated);
    assert_eq!(snap.items.len(), 12);
    assert!(snap.can_next());
    assert!(!snap.can_previous());
    assert_eq!(snap.pagination.label(), "Page 1 of 3");

    let calls = listing.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], ListingQuery::new());
}

#[tokio::test(start_paused = true)]
async fn edits_within_window_issue_one_query() {
    let listing = ScriptedListing::new();
    let (handle, _notices) = start(&listing, false);

    handle.set_search_text("chair").unwrap();
    sleep(Duration::from_millis(200)).await;
    handle.set_search_text("chairs").unwrap();

    sleep(Duration::from_millis(499)).await;
    assert!(listing.calls().is_empty());

    sleep(Duration::from_millis(2)).await;
    let calls = listing.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search_text, "chairs");
    assert_eq!(calls[0].page, 1);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(listing.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn mixed_filter_edits_settle_into_one_query() {
    let listing = ScriptedListing::new();
    let (handle, _notices) = start(&listing, false);

    handle.set_min_price(Some(100.0)).unwrap();
    sleep(Duration::from_millis(100)).await;
    handle.set_max_price(Some(50.0)).unwrap();
    sleep(Duration::from_millis(100)).await;
    handle.set_sort(SortKey::NameDesc).unwrap();
    sleep(Duration::from_millis(100)).await;
    handle.set_search_text("lamp").unwrap();

    sleep(Duration::from_secs(1)).await;
    let calls = listing.calls();
    assert_eq!(calls.len(), 1);
    let query = &calls[0];
    assert_eq!(query.min_price, Some(100.0));
    assert_eq!(query.max_price, Some(50.0));
    assert_eq!(query.sort, SortKey::NameDesc);
    assert_eq!(query.search_text, "lamp");
}

#[tokio::test(start_paused = true)]
async fn page_navigation_is_immediate_and_keeps_page() {
    let listing = ScriptedListing::new();
    listing.ok(0, 12, 3).ok(0, 12, 3).ok(0, 12, 3);

    let (handle, _notices) = start(&listing, true);
    settle().await;

    handle.next_page().unwrap();
    settle().await;
    let calls = listing.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].page, 2);
    assert_eq!(handle.snapshot().query.page, 2);

    handle.previous_page().unwrap();
    settle().await;
    let calls = listing.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].page, 1);
}

#[tokio::test(start_paused = true)]
async fn navigation_bounds_are_no_ops() {
    let listing = ScriptedListing::new();
    listing.ok(0, 5, 1);

    let (handle, _notices) = start(&listing, true);
    settle().await;

    handle.previous_page().unwrap();
    handle.next_page().unwrap();
    sleep(Duration::from_secs(1)).await;

    assert_eq!(listing.calls().len(), 1);
    let snap = handle.snapshot();
    assert_eq!(snap.query.page, 1);
    assert!(!snap.can_next());
    assert!(!snap.can_previous());
}

#[tokio::test(start_paused = true)]
async fn filter_edit_resets_page_before_query() {
    let listing = ScriptedListing::new();
    listing.ok(0, 12, 4).ok(0, 12, 4).ok(0, 12, 4);

    let (handle, _notices) = start(&listing, true);
    settle().await;
    handle.next_page().unwrap();
    settle().await;
    handle.next_page().unwrap();
    settle().await;
    assert_eq!(handle.snapshot().query.page, 3);

    handle.set_sort(SortKey::PriceAsc).unwrap();
    settle().await;
    assert_eq!(handle.snapshot().query.page, 1);

    sleep(Duration::from_millis(600)).await;
    let calls = listing.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[3].page, 1);
    assert_eq!(calls[3].sort, SortKey::PriceAsc);
}

#[tokio::test(start_paused = true)]
async fn later_request_wins_over_slow_earlier_one() {
    let listing = ScriptedListing::new();
    listing
        .reply(300, Ok(ResultPage::new(products("old", 7), 2)))
        .reply(50, Ok(ResultPage::new(products("new", 2), 1)));

    let (handle, _notices) = start(&listing, false);
    handle.refresh().unwrap();
    sleep(Duration::from_millis(10)).await;
    handle.refresh().unwrap();

    sleep(Duration::from_secs(1)).await;
    assert_eq!(listing.calls().len(), 2);

    let snap = handle.snapshot();
    assert!(!snap.loading);
    let ids: Vec<_> = snap.items.iter().map(|p| p.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["new1", "new2"]);
    assert_eq!(snap.pagination.total_pages, 1);
}

#[tokio::test(start_paused = true)]
async fn superseded_failure_raises_no_notice() {
    let listing = ScriptedListing::new();
    listing
        .reply(300, Err(FetchError::Request("connection reset".into())))
        .ok(10, 3, 1);

    let (handle, mut notices) = start(&listing, false);
    handle.refresh().unwrap();
    sleep(Duration::from_millis(10)).await;
    handle.refresh().unwrap();

    sleep(Duration::from_secs(1)).await;
    assert!(notices.try_recv().is_err());
    assert_eq!(handle.snapshot().display_state(), DisplayState::Populated);
}

#[tokio::test(start_paused = true)]
async fn empty_result_is_empty_state() {
    let listing = ScriptedListing::new();
    listing.ok(0, 0, 1);

    let (handle, mut notices) = start(&listing, true);
    settle().await;

    let snap = handle.snapshot();
    assert_eq!(snap.display_state(), DisplayState::Empty);
    assert!(!snap.can_next());
    assert!(!snap.can_previous());
    assert!(notices.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn failure_keeps_items_and_notifies_once() {
    let listing = ScriptedListing::new();
    listing
        .ok(0, 4, 2)
        .reply(20, Err(FetchError::Request("connection refused".into())));

    let (handle, mut notices) = start(&listing, true);
    settle().await;
    assert_eq!(handle.snapshot().items.len(), 4);

    handle.refresh().unwrap();
    settle().await;
    assert!(handle.snapshot().loading);

    sleep(Duration::from_millis(50)).await;
    let snap = handle.snapshot();
    assert!(!snap.loading);
    assert_eq!(snap.items.len(), 4);
    assert_eq!(snap.display_state(), DisplayState::Populated);

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.title, "Error fetching products");
    assert!(notices.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn shrinking_page_count_clamps_page() {
    let listing = ScriptedListing::new();
    listing
        .ok(0, 12, 3)
        .ok(0, 12, 3)
        .ok(0, 12, 3)
        .ok(0, 1, 1);

    let (handle, _notices) = start(&listing, true);
    settle().await;
    handle.next_page().unwrap();
    settle().await;
    handle.next_page().unwrap();
    settle().await;
    assert_eq!(handle.snapshot().pagination.label(), "Page 3 of 3");

    handle.refresh().unwrap();
    settle().await;
    let snap = handle.snapshot();
    assert_eq!(snap.pagination.label(), "Page 1 of 1");
    assert_eq!(snap.query.page, 1);
}

#[tokio::test(start_paused = true)]
async fn filter_edit_drops_in_flight_response() {
    let listing = ScriptedListing::new();
    listing
        .ok(0, 12, 3)
        .ok(0, 12, 3)
        .reply(300, Ok(ResultPage::new(products("old", 12), 3)))
        .reply(0, Ok(ResultPage::new(products("desk", 2), 1)));

    let (handle, mut notices) = start(&listing, true);
    settle().await;
    handle.next_page().unwrap();
    settle().await;
    handle.next_page().unwrap();
    settle().await;
    assert!(handle.snapshot().loading);

    handle.set_search_text("desk").unwrap();
    sleep(Duration::from_millis(350)).await;
    let snap = handle.snapshot();
    assert_eq!(snap.query.page, 1);
    assert!(snap.loading);
    assert!(snap.items.iter().all(|p| !p.id.as_str().starts_with("old")));

    sleep(Duration::from_millis(200)).await;
    let snap = handle.snapshot();
    assert!(!snap.loading);
    let ids: Vec<_> = snap.items.iter().map(|p| p.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["desk1", "desk2"]);
    assert_eq!(snap.pagination.label(), "Page 1 of 1");

    let calls = listing.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[3].search_text, "desk");
    assert_eq!(calls[3].page, 1);
    assert!(notices.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn navigation_cancels_pending_debounce() {
    let listing = ScriptedListing::new();
    listing.ok(0, 12, 3);

    let (handle, _notices) = start(&listing, true);
    settle().await;

    handle.set_search_text("desk").unwrap();
    sleep(Duration::from_millis(100)).await;
    handle.next_page().unwrap();

    sleep(Duration::from_secs(2)).await;
    let calls = listing.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].search_text, "desk");
    assert_eq!(calls[1].page, 2);
}

#[tokio::test(start_paused = true)]
async fn remove_product_updates_items_without_query() {
    let listing = ScriptedListing::new();
    listing.ok(0, 3, 1);

    let (handle, _notices) = start(&listing, true);
    settle().await;

    handle.remove_product(ProductId::new("p2")).unwrap();
    settle().await;

    let ids: Vec<_> = handle
        .snapshot()
        .items
        .iter()
        .map(|p| p.id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    assert_eq!(listing.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_published_snapshots() {
    let listing = ScriptedListing::new();
    listing.ok(100, 2, 1);

    let (handle, _notices) = start(&listing, false);
    let mut snapshots = handle.subscribe();

    handle.refresh().unwrap();
    snapshots.changed().await.unwrap();
    assert!(snapshots.borrow_and_update().loading);

    snapshots.changed().await.unwrap();
    let snap = snapshots.borrow_and_update().clone();
    assert!(!snap.loading);
    assert_eq!(snap.items.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_the_task() {
    let listing = ScriptedListing::new();
    listing.ok(10_000, 1, 1);

    let (handle, _notices) = start(&listing, true);
    settle().await;

    handle.shutdown().unwrap();
    handle.closed().await;
    assert!(handle.refresh().is_err());
    assert!(handle.snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_task() {
    let listing = ScriptedListing::new();
    let (handle, _notices) = start(&listing, false);
    let mut snapshots = handle.subscribe();
    drop(handle);

    // The sender side closes when the task exits.
    assert!(snapshots.changed().await.is_err());
}
