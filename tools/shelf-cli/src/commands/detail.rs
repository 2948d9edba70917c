//! Product detail commands.

use anyhow::{bail, Context as _, Result};
use shelf_commerce::ProductId;
use shelf_screens::{DetailScreen, DetailState};

use super::{ProductArgs, ProductRow};
use crate::context::Context;
use crate::output::{favorite_marker, feedback_heading, price_label, NO_REVIEWS};

async fn load(args: &ProductArgs, ctx: &Context) -> Result<DetailScreen> {
    let id = ProductId::parse(&args.id).context("Invalid product id")?;
    let mut screen = DetailScreen::new(id, ctx.favorite_sync().await?);

    let spinner = ctx.output.spinner(&format!("Fetching product {}...", args.id));
    screen.on_focus().await;
    spinner.finish_and_clear();

    if let DetailState::NotFound = screen.state() {
        bail!("Product {} not found", screen.id());
    }
    Ok(screen)
}

/// Run the show command.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let screen = load(&args, ctx).await?;
    let Some(product) = screen.product() else {
        bail!("Product {} not found", screen.id());
    };
    let currency = ctx.currency();

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} {}",
        favorite_marker(screen.is_favorite()),
        product.name
    ));
    ctx.output.kv("id", product.id.as_str());
    if !product.brand.is_empty() {
        ctx.output.kv("brand", &product.brand);
    }
    let list = product.list_price(currency);
    let discounted = product.discounted_price(currency);
    ctx.output.kv(
        "price",
        &price_label(list, discounted, product.discount_percent()),
    );
    if let Some(saved) = list.try_subtract(&discounted).filter(|m| !m.is_zero()) {
        ctx.output.kv("you save", &saved.display());
    }
    if !product.image.is_empty() {
        ctx.output.kv("image", &product.image);
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    let Some(heading) = feedback_heading(product) else {
        ctx.output.info("");
        ctx.output.info(NO_REVIEWS);
        return Ok(());
    };
    ctx.output.header(&heading);
    for feedback in &product.feedbacks {
        ctx.output.list_item(&format!(
            "{} {}: {}",
            feedback.rating_label(),
            feedback.author,
            feedback.comment
        ));
    }

    Ok(())
}

/// Run the toggle command.
pub async fn toggle(args: ProductArgs, ctx: &Context) -> Result<()> {
    let mut screen = load(&args, ctx).await?;
    let Some(report) = screen.toggle_favorite().await else {
        bail!("Product {} not found", screen.id());
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "report": report,
            "product": screen
                .product()
                .map(|p| ProductRow::from_product(p, ctx.currency())),
        }));
    } else {
        ctx.output.sync_report(&report);
    }

    if !report.remote_applied() {
        bail!("The catalog rejected the update for {}", report.product_id);
    }
    Ok(())
}
