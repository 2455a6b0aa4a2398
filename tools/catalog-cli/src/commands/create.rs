//! Create a product.

use anyhow::{anyhow, bail, Result};
use catalog_core::{Notice, ProductForm};

use super::{report_validation, value_or_prompt, CreateArgs};
use crate::context::Context;

/// Run the create command.
pub async fn run(args: CreateArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    if !session.is_logged_in() {
        ctx.output.notice(&Notice::unauthorized("add"));
        return Ok(());
    }

    let form = ProductForm::new(
        value_or_prompt(args.name, "Product name")?,
        value_or_prompt(args.price, "Price")?,
        value_or_prompt(args.image, "Image URL")?,
    );

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            report_validation(&ctx.output, &errors);
            bail!("Product not created: {} invalid field(s)", errors.len());
        }
    };

    let client = ctx.client()?;
    let spinner = ctx.output.spinner("Creating product...");
    let result = client.create_product(&draft, &session).await;
    spinner.finish_and_clear();

    result.map_err(|e| anyhow!("Error: {}", e.user_message()))?;
    ctx.output.notice(&Notice::success("Product created"));

    Ok(())
}
