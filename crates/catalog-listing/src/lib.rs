//! The product listing controller.
//!
//! Owns the listing query (search text, price bounds, sort, page), debounces
//! filter edits, keeps at most one request in flight and exposes the result
//! as a stream of [`ListingSnapshot`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_client::CatalogClient;
//! use catalog_listing::{ListingConfig, ListingController};
//!
//! let client = Arc::new(CatalogClient::new("http://localhost:5000/api")?);
//! let (handle, mut notices) = ListingController::spawn(client, ListingConfig::default());
//!
//! handle.set_search_text("chair")?;
//! let mut snapshots = handle.subscribe();
//! snapshots.changed().await?;
//! ```

mod controller;
mod debounce;
mod sequence;
mod state;

pub use controller::{
    ControllerClosed, ListingCommand, ListingConfig, ListingController, ListingHandle,
    NoticeReceiver, DEFAULT_DEBOUNCE,
};
pub use debounce::Debouncer;
pub use sequence::RequestSequence;
pub use state::{Applied, DisplayState, ListingSnapshot, ListingState};
