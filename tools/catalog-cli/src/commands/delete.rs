//! Delete a product.

use anyhow::{anyhow, Result};
use catalog_core::{Notice, ProductId};
use dialoguer::Confirm;

use super::DeleteArgs;
use crate::context::Context;

pub const CONFIRM_DELETE: &str =
    "Are you sure you want to delete this product? This action cannot be undone.";

/// Run the delete command.
pub async fn run(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    if !session.is_logged_in() {
        ctx.output.notice(&Notice::unauthorized("delete"));
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(CONFIRM_DELETE)
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Delete cancelled");
            return Ok(());
        }
    }

    let client = ctx.client()?;
    let id = ProductId::new(args.id);

    let spinner = ctx.output.spinner("Deleting product...");
    let result = client.delete_product(&id, &session).await;
    spinner.finish_and_clear();

    result.map_err(|e| anyhow!("Error: {}", e.user_message()))?;
    ctx.output.notice(&Notice::success("Product deleted"));

    Ok(())
}
