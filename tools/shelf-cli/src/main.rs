//! Shelf CLI - terminal client for the Shelf storefront.
//!
//! Commands:
//! - `shelf list` - Catalog listing with brand and text filters
//! - `shelf brands` - Distinct brands in the catalog
//! - `shelf show` - Product detail with feedback
//! - `shelf toggle` - Favorite or unfavorite a product
//! - `shelf favorites` - Favorited products
//! - `shelf remove` - Drop one favorite
//! - `shelf clear` - Drop every favorite
//! - `shelf open` - Open a screen by path
//! - `shelf config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ClearArgs, ConfigArgs, ListArgs, OpenArgs, ProductArgs};

/// Shelf - browse the catalog and manage favorites
#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Named environment from the config file
    #[arg(short, long, global = true)]
    env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    List(ListArgs),

    /// List the distinct brands
    Brands,

    /// Show one product
    Show(ProductArgs),

    /// Favorite or unfavorite a product
    Toggle(ProductArgs),

    /// List favorited products
    Favorites,

    /// Remove one favorite
    Remove(ProductArgs),

    /// Remove every favorite
    Clear(ClearArgs),

    /// Open a screen by path
    Open(OpenArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.env.as_deref(), output)?;

    let mut logging = ctx.config.logging.clone();
    if cli.verbose {
        logging.level = logging.level.min(shelf_observability::LogLevel::Debug);
    }
    shelf_observability::init_logging(&logging)?;

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::catalog::list(args, &ctx).await,
        Commands::Brands => commands::catalog::brands(&ctx).await,
        Commands::Show(args) => commands::detail::show(args, &ctx).await,
        Commands::Toggle(args) => commands::detail::toggle(args, &ctx).await,
        Commands::Favorites => commands::favorites::list(&ctx).await,
        Commands::Remove(args) => commands::favorites::remove(args, &ctx).await,
        Commands::Clear(args) => commands::favorites::clear(args, &ctx).await,
        Commands::Open(args) => commands::open(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_commerce::ProductId;
    use shelf_screens::Route;

    #[test]
    fn test_open_parses_screen_paths() {
        let cli = Cli::try_parse_from(["shelf", "open", "/detail/7"]).unwrap();
        match cli.command {
            Commands::Open(args) => assert_eq!(
                args.route,
                Route::Detail {
                    id: ProductId::new("7")
                }
            ),
            _ => panic!("expected open"),
        }

        let cli = Cli::try_parse_from(["shelf", "open", "/favourite/"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Open(OpenArgs {
                route: Route::Favourite
            })
        ));
    }

    #[test]
    fn test_open_rejects_unknown_paths() {
        assert!(Cli::try_parse_from(["shelf", "open", "/cart"]).is_err());
    }
}
