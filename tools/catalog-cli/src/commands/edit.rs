//! Edit a product.

use anyhow::{anyhow, bail, Result};
use catalog_core::{Notice, ProductForm, ProductId};
use dialoguer::Input;

use super::{report_validation, EditArgs};
use crate::context::Context;

/// Run the edit command.
///
/// Fields given on the command line replace the current values; when none
/// are given every field is prompted for, prefilled with its current value.
pub async fn run(args: EditArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session()?;
    if !session.is_logged_in() {
        ctx.output.notice(&Notice::unauthorized("edit"));
        return Ok(());
    }

    let client = ctx.client()?;
    let id = ProductId::new(args.id);

    let spinner = ctx.output.spinner("Loading product...");
    let current = client.get_product(&id).await;
    spinner.finish_and_clear();
    let current =
        current.map_err(|e| anyhow!("Error loading product: {}", e.user_message()))?;

    let mut form = ProductForm::from_product(&current);
    if args.name.is_none() && args.price.is_none() && args.image.is_none() {
        form.name = prompt_with_default("Product name", &form.name)?;
        form.price = prompt_with_default("Price", &form.price)?;
        form.image = prompt_with_default("Image URL", &form.image)?;
    } else {
        merge(&mut form, args.name, args.price, args.image);
    }

    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            report_validation(&ctx.output, &errors);
            bail!("Product not updated: {} invalid field(s)", errors.len());
        }
    };

    let spinner = ctx.output.spinner("Saving product...");
    let result = client.update_product(&id, &draft, &session).await;
    spinner.finish_and_clear();

    result.map_err(|e| anyhow!("Error updating product: {}", e.user_message()))?;
    ctx.output.notice(&Notice::success("Product updated!"));

    Ok(())
}

/// Overwrite only the supplied fields.
fn merge(
    form: &mut ProductForm,
    name: Option<String>,
    price: Option<String>,
    image: Option<String>,
) {
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(price) = price {
        form.price = price;
    }
    if let Some(image) = image {
        form.image = image;
    }
}

fn prompt_with_default(prompt: &str, current: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?)
}
