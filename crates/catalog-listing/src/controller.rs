//! The controller task and its handle.
//!
//! A single tokio task owns the [`ListingState`]. Inputs arrive as
//! [`ListingCommand`]s; the task waits on exactly three things: the next
//! command, the debounce deadline and the response to the request in
//! flight. Snapshots go out on a `watch` channel, failure notices on an
//! unbounded `mpsc` channel.

use crate::debounce::Debouncer;
use crate::state::{Applied, ListingSnapshot, ListingState};
use catalog_client::{FetchError, ProductListing};
use catalog_core::{Notice, ProductId, ResultPage, SortKey};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Quiet period after the last filter edit before a query is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Receiver for failure notices raised by the controller.
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Controller settings.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Debounce quiet period for filter edits.
    pub debounce: Duration,
    /// Issue the first-page query as soon as the controller starts.
    pub load_on_start: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            load_on_start: true,
        }
    }
}

/// Inputs accepted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingCommand {
    SetSearchText(String),
    SetMinPrice(Option<f64>),
    SetMaxPrice(Option<f64>),
    SetSort(SortKey),
    NextPage,
    PreviousPage,
    Refresh,
    RemoveProduct(ProductId),
    Shutdown,
}

/// The controller task is no longer running.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("listing controller has stopped")]
pub struct ControllerClosed;

/// Cheap, cloneable handle to a running controller.
#[derive(Clone)]
pub struct ListingHandle {
    commands: mpsc::UnboundedSender<ListingCommand>,
    snapshots: watch::Receiver<ListingSnapshot>,
}

impl ListingHandle {
    /// Send a raw command.
    pub fn send(&self, command: ListingCommand) -> Result<(), ControllerClosed> {
        self.commands.send(command).map_err(|_| ControllerClosed)
    }

    pub fn set_search_text(&self, text: impl Into<String>) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::SetSearchText(text.into()))
    }

    pub fn set_min_price(&self, min: Option<f64>) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::SetMinPrice(min))
    }

    pub fn set_max_price(&self, max: Option<f64>) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::SetMaxPrice(max))
    }

    pub fn set_sort(&self, sort: SortKey) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::SetSort(sort))
    }

    /// Go to the next page immediately. No-op on the last page.
    pub fn next_page(&self) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::NextPage)
    }

    /// Go to the previous page immediately. No-op on page 1.
    pub fn previous_page(&self) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::PreviousPage)
    }

    /// Re-run the current query now.
    pub fn refresh(&self) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::Refresh)
    }

    /// Drop a deleted product from the displayed page.
    pub fn remove_product(&self, id: ProductId) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::RemoveProduct(id))
    }

    /// Stop the controller and abort its in-flight request.
    pub fn shutdown(&self) -> Result<(), ControllerClosed> {
        self.send(ListingCommand::Shutdown)
    }

    /// Resolves once the controller task has exited.
    pub async fn closed(&self) {
        self.commands.closed().await
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> ListingSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ListingSnapshot> {
        self.snapshots.clone()
    }
}

/// Entry point for starting a controller.
pub struct ListingController;

impl ListingController {
    /// Start the controller on the current tokio runtime.
    ///
    /// The task stops on [`ListingHandle::shutdown`] or once every handle
    /// has been dropped.
    pub fn spawn<S: ProductListing>(
        source: Arc<S>,
        config: ListingConfig,
    ) -> (ListingHandle, NoticeReceiver) {
        let state = ListingState::new();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let task = ControllerTask {
            source,
            state,
            debouncer: Debouncer::new(config.debounce),
            commands: command_rx,
            completion_tx,
            completions: completion_rx,
            snapshots: snapshot_tx,
            notices: notice_tx,
            in_flight: None,
        };
        tokio::spawn(task.run(config.load_on_start));

        let handle = ListingHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (handle, notice_rx)
    }
}

struct Completion {
    seq: u64,
    result: Result<ResultPage, FetchError>,
}

struct ControllerTask<S> {
    source: Arc<S>,
    state: ListingState,
    debouncer: Debouncer,
    commands: mpsc::UnboundedReceiver<ListingCommand>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
    snapshots: watch::Sender<ListingSnapshot>,
    notices: mpsc::UnboundedSender<Notice>,
    in_flight: Option<JoinHandle<()>>,
}

impl<S: ProductListing> ControllerTask<S> {
    async fn run(mut self, load_on_start: bool) {
        if load_on_start {
            self.issue();
        }

        loop {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(ListingCommand::Shutdown) | None => break,
                    Some(command) => self.handle(command),
                },
                Some(completion) = self.completions.recv() => self.complete(completion),
                _ = Debouncer::wait(deadline) => {
                    self.debouncer.cancel();
                    self.issue();
                }
            }
        }

        if let Some(request) = self.in_flight.take() {
            request.abort();
        }
        debug!("listing controller stopped");
    }

    fn handle(&mut self, command: ListingCommand) {
        match command {
            ListingCommand::SetSearchText(text) => {
                self.state.set_search_text(text);
                self.edited();
            }
            ListingCommand::SetMinPrice(min) => {
                self.state.set_min_price(min);
                self.edited();
            }
            ListingCommand::SetMaxPrice(max) => {
                self.state.set_max_price(max);
                self.edited();
            }
            ListingCommand::SetSort(sort) => {
                self.state.set_sort(sort);
                self.edited();
            }
            ListingCommand::NextPage => {
                if self.state.next_page() {
                    self.navigate();
                }
            }
            ListingCommand::PreviousPage => {
                if self.state.previous_page() {
                    self.navigate();
                }
            }
            ListingCommand::Refresh => self.navigate(),
            ListingCommand::RemoveProduct(id) => {
                if self.state.remove_item(&id) {
                    self.publish();
                }
            }
            ListingCommand::Shutdown => {}
        }
    }

    /// Filter edit: page already reset. The request in flight answers the
    /// old filters, so drop it and wait for the quiet period.
    fn edited(&mut self) {
        if self.state.supersede() {
            if let Some(request) = self.in_flight.take() {
                request.abort();
            }
            debug!("filter edit superseded in-flight listing query");
        }
        self.debouncer.schedule();
        self.publish();
    }

    /// Immediate query with the current filters; a pending edit rides along.
    fn navigate(&mut self) {
        self.debouncer.cancel();
        self.issue();
    }

    fn issue(&mut self) {
        let (seq, query) = self.state.begin_request();
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        debug!(
            seq,
            page = query.page,
            search = %query.search_text,
            sort = %query.sort,
            "issuing listing query"
        );

        let source = Arc::clone(&self.source);
        let completions = self.completion_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = source.list_products(&query).await;
            let _ = completions.send(Completion { seq, result });
        }));

        self.publish();
    }

    fn complete(&mut self, completion: Completion) {
        let Completion { seq, result } = completion;
        match self.state.apply(seq, result) {
            Applied::Stale => {
                debug!(seq, "discarding superseded listing response");
                return;
            }
            Applied::Success => {
                self.in_flight = None;
            }
            Applied::Failed(err) => {
                self.in_flight = None;
                warn!(seq, error = %err, "listing query failed");
                let _ = self
                    .notices
                    .send(Notice::error("Error fetching products", err.user_message()));
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }
}
