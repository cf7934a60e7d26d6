//! Atelier CLI - Drive the storefront stores from a terminal.
//!
//! State is persisted under `ATELIER_DATA_DIR`, so consecutive invocations
//! behave like page loads of the same browser session.
//!
//! # Usage
//!
//! ```bash
//! # Browse the shop
//! atelier catalog --category sneakers --sort price-asc
//!
//! # Fill the bag
//! atelier cart add 1 --size 42 --qty 2
//! atelier cart update 1 --size 42 5
//! atelier cart show
//!
//! # Save for later
//! atelier wishlist toggle 6
//!
//! # Product page view and its "recently viewed" rail
//! atelier viewed add 3
//! atelier viewed show --exclude 3
//! ```
//!
//! # Commands
//!
//! - `catalog` - Filter and sort the product list
//! - `cart` - Show, add, update, remove, clear
//! - `wishlist` - Show, toggle
//! - `viewed` - Show, add
//! - `checkout` - Always refused (online payment is disabled)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)] // stdout is the CLI's view layer

use atelier_core::{Category, ProductId, Size};
use atelier_storefront::catalog::SortOrder;
use atelier_storefront::config::StorefrontConfig;
use atelier_storefront::state::AppContext;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about = "Atelier storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with shop-page filters
    Catalog {
        /// Category slug (sneakers, boots, loafers, bags, accessories, apparel)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only products offered in this size
        #[arg(short, long)]
        size: Option<Size>,

        /// Minimum price (inclusive)
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Maximum price (inclusive)
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        /// Hide sold-out products
        #[arg(long)]
        in_stock: bool,

        /// featured, newest, price-asc or price-desc
        #[arg(long, default_value = "featured")]
        sort: SortOrder,
    },
    /// Manage the shopping bag
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Recently viewed products
    Viewed {
        #[command(subcommand)]
        action: ViewedAction,
    },
    /// Attempt checkout
    Checkout,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show bag contents and totals
    Show,
    /// Add a product
    Add {
        product_id: ProductId,
        #[arg(short, long)]
        size: Option<Size>,
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Set a line's quantity (clamped to 1-10)
    Update {
        product_id: ProductId,
        #[arg(short, long)]
        size: Option<Size>,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a line
    Remove {
        product_id: ProductId,
        #[arg(short, long)]
        size: Option<Size>,
    },
    /// Empty the bag
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save or unsave a product
    Toggle { product_id: ProductId },
}

#[derive(Subcommand)]
enum ViewedAction {
    /// Show recently viewed products
    Show {
        /// Product currently on screen
        #[arg(long)]
        exclude: Option<ProductId>,
    },
    /// Record a product view
    Add { product_id: ProductId },
    /// Forget all views
    Clear,
}

fn main() {
    // Log to stderr so stdout stays clean for command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "atelier_storefront=warn,atelier=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let mut ctx = AppContext::open(config)?;

    let result: atelier_storefront::error::Result<()> = match cli.command {
        Commands::Catalog {
            category,
            size,
            min_price,
            max_price,
            search,
            in_stock,
            sort,
        } => {
            commands::catalog::list(
                &ctx,
                &commands::catalog::Filters {
                    category,
                    size,
                    min_price,
                    max_price,
                    search,
                    in_stock,
                    sort,
                },
            );
            Ok(())
        }
        Commands::Cart { action } => match action {
            CartAction::Show => {
                commands::cart::show(&ctx);
                Ok(())
            }
            CartAction::Add {
                product_id,
                size,
                qty,
            } => commands::cart::add(&mut ctx, &product_id, size.as_ref(), qty),
            CartAction::Update {
                product_id,
                size,
                qty,
            } => commands::cart::update(&mut ctx, &product_id, size.as_ref(), qty),
            CartAction::Remove { product_id, size } => {
                commands::cart::remove(&mut ctx, &product_id, size.as_ref());
                Ok(())
            }
            CartAction::Clear => {
                commands::cart::clear(&mut ctx);
                Ok(())
            }
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => {
                commands::wishlist::show(&ctx);
                Ok(())
            }
            WishlistAction::Toggle { product_id } => {
                commands::wishlist::toggle(&mut ctx, &product_id)
            }
        },
        Commands::Viewed { action } => match action {
            ViewedAction::Show { exclude } => {
                commands::viewed::show(&ctx, exclude.as_ref());
                Ok(())
            }
            ViewedAction::Add { product_id } => commands::viewed::add(&mut ctx, &product_id),
            ViewedAction::Clear => {
                ctx.recently_viewed_mut().clear();
                Ok(())
            }
        },
        Commands::Checkout => commands::cart::checkout(&mut ctx),
    };

    commands::print_toasts(&ctx);
    Ok(result?)
}
