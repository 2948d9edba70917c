//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod favorites;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use shelf_commerce::{Currency, FavoriteRecord, Product};
use shelf_screens::Route;

use crate::context::Context;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only products of this brand.
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Case-insensitive text to look for in product names.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for commands that act on one product.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the open command.
#[derive(Args)]
pub struct OpenArgs {
    /// Screen path: `/`, `/favourite` or `/detail/<id>`.
    pub route: Route,
}

/// Run the command behind a screen path.
pub async fn open(args: OpenArgs, ctx: &Context) -> Result<()> {
    ctx.output
        .debug(&format!("Opening {} ({})", args.route.title(), args.route));
    match args.route {
        Route::Home => {
            let args = ListArgs {
                brand: None,
                search: None,
            };
            catalog::list(args, ctx).await
        }
        Route::Favourite => favorites::list(ctx).await,
        Route::Detail { id } => detail::show(ProductArgs { id: id.to_string() }, ctx).await,
    }
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// One listed product as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub discounted_price: String,
    pub discount_percent: u32,
    pub favorite: bool,
}

impl ProductRow {
    pub fn from_product(product: &Product, currency: Currency) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.list_price(currency).display_amount(),
            discounted_price: product.discounted_price(currency).display_amount(),
            discount_percent: product.discount_percent(),
            favorite: product.is_favorite(),
        }
    }

    pub fn from_record(record: &FavoriteRecord, currency: Currency) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            brand: String::new(),
            price: shelf_commerce::Money::from_decimal(record.price, currency).display_amount(),
            discounted_price: record.discounted_price(currency).display_amount(),
            discount_percent: record.discount_percent(),
            favorite: record.status,
        }
    }
}
