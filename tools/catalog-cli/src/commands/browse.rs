//! Interactive browsing.
//!
//! Lines read from stdin drive a [`ListingController`]; every settled
//! snapshot is rendered as a product table.

use std::sync::Arc;

use anyhow::Result;
use catalog_client::CatalogClient;
use catalog_core::{
    format_price, parse_price_input, ListingQuery, Notice, Pagination, Product, ProductId, SortKey,
};
use catalog_listing::{
    ControllerClosed, DisplayState, ListingConfig, ListingController, ListingHandle,
    ListingSnapshot,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::delete::CONFIRM_DELETE;
use super::BrowseArgs;
use crate::context::Context;
use crate::output::Output;

/// One parsed line of browse input.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseInput {
    Search(String),
    MinPrice(Option<f64>),
    MaxPrice(Option<f64>),
    Sort(SortKey),
    Next,
    Previous,
    Refresh,
    Delete(ProductId),
    Help,
    Quit,
    Nothing,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let initial = args.filters.to_query()?;
    let client = Arc::new(ctx.client()?);

    let config = ListingConfig {
        load_on_start: args.filters.is_empty(),
        ..ListingConfig::default()
    };
    let (handle, mut notices) = ListingController::spawn(Arc::clone(&client), config);
    if !args.filters.is_empty() {
        start_with(&handle, &initial)?;
    }

    print_help(&ctx.output);

    let mut snapshots = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_view: Option<View> = None;
    let mut pending_delete: Option<ProductId> = None;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                render(&ctx.output, &mut last_view, &snapshot);
            }
            Some(notice) = notices.recv() => ctx.output.notice(&notice),
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                if let Some(id) = pending_delete.take() {
                    if matches!(line.trim().to_lowercase().as_str(), "y" | "yes") {
                        delete(ctx, &client, &handle, id).await?;
                    } else {
                        ctx.output.warn("Delete cancelled");
                    }
                    continue;
                }

                match parse_input(&line) {
                    Ok(BrowseInput::Quit) => break,
                    Ok(BrowseInput::Help) => print_help(&ctx.output),
                    Ok(BrowseInput::Nothing) => {}
                    Ok(BrowseInput::Delete(id)) => {
                        ctx.output.prompt(&format!("{} [y/N]", CONFIRM_DELETE));
                        pending_delete = Some(id);
                    }
                    Ok(input) => apply(&handle, input)?,
                    Err(message) => ctx.output.warn(&message),
                }
            }
        }
    }

    // Already stopped if the snapshot channel closed.
    let _ = handle.shutdown();
    handle.closed().await;
    Ok(())
}

/// Load the first page for the filters given on the command line.
fn start_with(handle: &ListingHandle, query: &ListingQuery) -> Result<(), ControllerClosed> {
    handle.set_search_text(query.search_text.clone())?;
    handle.set_min_price(query.min_price)?;
    handle.set_max_price(query.max_price)?;
    handle.set_sort(query.sort)?;
    handle.refresh()
}

/// Parse one line of input.
pub fn parse_input(line: &str) -> Result<BrowseInput, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(BrowseInput::Nothing);
    }

    if let Some(rest) = trimmed.strip_prefix('/') {
        let (command, arg) = match rest.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (rest, ""),
        };

        return match command {
            "search" | "s" => Ok(BrowseInput::Search(arg.to_string())),
            "min" => parse_price_input(arg)
                .map(BrowseInput::MinPrice)
                .map_err(|e| e.to_string()),
            "max" => parse_price_input(arg)
                .map(BrowseInput::MaxPrice)
                .map_err(|e| e.to_string()),
            "sort" => arg.parse::<SortKey>().map(BrowseInput::Sort),
            "delete" | "rm" if arg.is_empty() => Err("usage: /delete <id>".to_string()),
            "delete" | "rm" => Ok(BrowseInput::Delete(ProductId::new(arg))),
            other => Err(format!("Unknown command: /{}", other)),
        };
    }

    match trimmed {
        "n" | "next" => Ok(BrowseInput::Next),
        "p" | "prev" | "previous" => Ok(BrowseInput::Previous),
        "r" | "refresh" => Ok(BrowseInput::Refresh),
        "h" | "help" | "?" => Ok(BrowseInput::Help),
        "q" | "quit" | "exit" => Ok(BrowseInput::Quit),
        other => Err(format!("Unknown input '{}'; type h for help", other)),
    }
}

fn apply(handle: &ListingHandle, input: BrowseInput) -> Result<(), ControllerClosed> {
    match input {
        BrowseInput::Search(text) => handle.set_search_text(text),
        BrowseInput::MinPrice(min) => handle.set_min_price(min),
        BrowseInput::MaxPrice(max) => handle.set_max_price(max),
        BrowseInput::Sort(sort) => handle.set_sort(sort),
        BrowseInput::Next => handle.next_page(),
        BrowseInput::Previous => handle.previous_page(),
        BrowseInput::Refresh => handle.refresh(),
        BrowseInput::Delete(_) | BrowseInput::Help | BrowseInput::Quit | BrowseInput::Nothing => {
            Ok(())
        }
    }
}

async fn delete(
    ctx: &Context,
    client: &CatalogClient,
    handle: &ListingHandle,
    id: ProductId,
) -> Result<()> {
    let session = ctx.session()?;
    match client.delete_product(&id, &session).await {
        Ok(()) => {
            handle.remove_product(id)?;
            ctx.output.notice(&Notice::success("Product deleted"));
        }
        Err(e) if e.is_unauthorized() => ctx.output.notice(&Notice::unauthorized("delete")),
        Err(e) => ctx.output.notice(&Notice::error("Error", e.user_message())),
    }
    Ok(())
}

/// The parts of a snapshot that change what is on screen.
#[derive(Debug, Clone, PartialEq)]
struct View {
    items: Vec<Product>,
    pagination: Pagination,
    loading: bool,
}

/// Render `snapshot` unless it shows the same thing as last time.
///
/// Filter edits publish snapshots that only change the query; those are
/// skipped until their debounced response arrives.
fn render(output: &Output, last: &mut Option<View>, snapshot: &ListingSnapshot) {
    let view = View {
        items: snapshot.items.clone(),
        pagination: snapshot.pagination,
        loading: snapshot.loading,
    };
    if last.as_ref() == Some(&view) {
        return;
    }

    match snapshot.display_state() {
        DisplayState::Loading => output.info("Loading products..."),
        DisplayState::Empty | DisplayState::Populated => {
            output.header(&format!("Products: {}", describe_query(&snapshot.query)));
            output.product_page(&view.items, &view.pagination);
            if let Some(hint) = paging_hint(snapshot) {
                output.info(hint);
            }
        }
    }
    *last = Some(view);
}

/// Short summary of the active filters.
pub fn describe_query(query: &ListingQuery) -> String {
    let mut parts = Vec::new();
    if !query.search_text.is_empty() {
        parts.push(format!("\"{}\"", query.search_text));
    }
    match (query.min_price, query.max_price) {
        (Some(min), Some(max)) => {
            parts.push(format!("{} to {}", format_price(min), format_price(max)))
        }
        (Some(min), None) => parts.push(format!("from {}", format_price(min))),
        (None, Some(max)) => parts.push(format!("up to {}", format_price(max))),
        (None, None) => {}
    }
    if query.sort != SortKey::None {
        parts.push(query.sort.display_name().to_string());
    }

    if parts.is_empty() {
        "all".to_string()
    } else {
        parts.join(", ")
    }
}

/// Which page keys currently do something.
fn paging_hint(snapshot: &ListingSnapshot) -> Option<&'static str> {
    match (snapshot.can_previous(), snapshot.can_next()) {
        (true, true) => Some("p previous page, n next page"),
        (true, false) => Some("p previous page"),
        (false, true) => Some("n next page"),
        (false, false) => None,
    }
}

fn print_help(output: &Output) {
    let keys: Vec<String> = SortKey::ALL.iter().map(SortKey::to_string).collect();
    output.info("/search <text>  /min <price>  /max <price>  /sort <key>");
    output.info(&format!("sort keys: {}", keys.join(", ")));
    output.info("n next page  p previous page  r refresh  /delete <id>  q quit");
}
