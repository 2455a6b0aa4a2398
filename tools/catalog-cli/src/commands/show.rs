//! Show a single product.

use anyhow::{anyhow, Result};
use catalog_core::ProductId;

use super::ShowArgs;
use crate::context::Context;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let id = ProductId::new(args.id);

    let spinner = ctx.output.spinner("Loading product...");
    let result = client.get_product(&id).await;
    spinner.finish_and_clear();

    let product = result.map_err(|e| anyhow!("Error loading product: {}", e.user_message()))?;
    ctx.output.product(&product);

    Ok(())
}
