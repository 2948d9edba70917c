//! Favorites commands.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use shelf_commerce::ProductId;
use shelf_screens::{FavoritesScreen, FavoritesSource, SyncReport};

use super::{ClearArgs, ProductArgs, ProductRow};
use crate::context::Context;
use crate::output::plain_price;

async fn load(ctx: &Context) -> Result<FavoritesScreen> {
    let mut screen = FavoritesScreen::new(ctx.favorite_sync().await?);

    let spinner = ctx.output.spinner("Loading favorites...");
    screen.on_focus().await;
    spinner.finish_and_clear();

    if screen.source() != FavoritesSource::Remote {
        ctx.output
            .warn("Catalog unreachable, showing favorites saved on this device");
    }
    Ok(screen)
}

/// Run the favorites command.
pub async fn list(ctx: &Context) -> Result<()> {
    let screen = load(ctx).await?;
    let currency = ctx.currency();

    if ctx.output.is_json() {
        let rows: Vec<ProductRow> = screen
            .items()
            .iter()
            .map(|r| ProductRow::from_record(r, currency))
            .collect();
        ctx.output.json(&serde_json::json!({
            "source": screen.source(),
            "items": rows,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Favorites ({})", screen.items().len()));
    if screen.is_empty() {
        ctx.output.info("No favorites yet");
        return Ok(());
    }

    let widths = [6, 32, 12, 5];
    ctx.output.table_row(&["ID", "NAME", "PRICE", "DEAL"], &widths);
    for record in screen.items() {
        let price = plain_price(record.discounted_price(currency), currency);
        let deal = match record.discount_percent() {
            0 => String::new(),
            percent => format!("-{}%", percent),
        };
        ctx.output
            .table_row(&[record.id.as_str(), &record.name, &price, &deal], &widths);
    }

    Ok(())
}

/// Run the remove command.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::parse(&args.id).context("Invalid product id")?;
    let mut screen = load(ctx).await?;

    if !screen.items().iter().any(|r| r.id == id) {
        ctx.output.warn(&format!("{} is not in the favorites list", id));
    }
    let report = screen.remove(&id).await;
    print_reports(ctx, &[report]);
    Ok(())
}

/// Run the clear command.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut screen = load(ctx).await?;
    if screen.is_empty() {
        ctx.output.info("No favorites to clear");
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} favorites?", screen.items().len()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Clearing favorites...");
    let reports = screen.clear_all().await;
    spinner.finish_and_clear();

    print_reports(ctx, &reports);
    Ok(())
}

fn print_reports(ctx: &Context, reports: &[SyncReport]) {
    if ctx.output.is_json() {
        ctx.output.json(&reports);
        return;
    }

    for report in reports {
        ctx.output.sync_report(report);
    }
    let failed = reports.iter().filter(|r| !r.remote_applied()).count();
    if failed > 0 {
        ctx.output.warn(&format!(
            "{} of {} catalog updates failed; they will show up again on the next refresh",
            failed,
            reports.len()
        ));
    }
}
