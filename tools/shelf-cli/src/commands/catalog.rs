//! Catalog listing commands.

use anyhow::{bail, Result};
use shelf_screens::CatalogScreen;

use super::{ListArgs, ProductRow};
use crate::context::Context;
use crate::output::plain_price;

async fn load(ctx: &Context) -> Result<CatalogScreen> {
    let mut screen = CatalogScreen::new(ctx.favorite_sync().await?);

    let spinner = ctx.output.spinner("Fetching catalog...");
    let loaded = screen.on_focus().await;
    spinner.finish_and_clear();

    if !loaded {
        bail!("Could not fetch the catalog from {}", ctx.config.api.base_url);
    }
    Ok(screen)
}

/// Run the list command.
pub async fn list(args: ListArgs, ctx: &Context) -> Result<()> {
    let mut screen = load(ctx).await?;
    if let Some(brand) = args.brand.as_deref() {
        if !screen.view().brands().iter().any(|b| b == brand) {
            ctx.output.warn(&format!("No products of brand '{}'", brand));
        }
        screen.select_brand(brand);
    }
    if let Some(search) = args.search {
        screen.set_search(search);
    }

    let currency = ctx.currency();
    let view = screen.view();

    if ctx.output.is_json() {
        let rows: Vec<ProductRow> = view
            .filtered()
            .iter()
            .map(|p| ProductRow::from_product(p, currency))
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Catalog ({} of {})",
        view.filtered().len(),
        view.items().len()
    ));
    if view.filtered().is_empty() {
        ctx.output.info("No products match");
        return Ok(());
    }

    let widths = [1, 6, 32, 14, 12, 5];
    ctx.output
        .table_row(&["", "ID", "NAME", "BRAND", "PRICE", "DEAL"], &widths);
    for product in view.filtered() {
        let price = plain_price(product.discounted_price(currency), currency);
        let deal = match product.discount_percent() {
            0 => String::new(),
            percent => format!("-{}%", percent),
        };
        let marker = if product.is_favorite() { "♥" } else { "" };
        ctx.output.table_row(
            &[marker, product.id.as_str(), &product.name, &product.brand, &price, &deal],
            &widths,
        );
    }

    Ok(())
}

/// Run the brands command.
pub async fn brands(ctx: &Context) -> Result<()> {
    let screen = load(ctx).await?;
    let brands = screen.view().brands();

    if ctx.output.is_json() {
        ctx.output.json(&brands);
        return Ok(());
    }

    ctx.output.header("Brands");
    for brand in brands {
        ctx.output.list_item(brand);
    }

    Ok(())
}
