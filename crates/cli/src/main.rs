//! Shopfront CLI - Browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered
//! shop products --category footwear --search sh
//!
//! # List categories
//! shop categories
//!
//! # Manage the cart
//! shop cart add 1
//! shop cart inc 1
//! shop cart show
//!
//! # Toggle a favourite
//! shop favourites toggle 2
//! ```
//!
//! # Commands
//!
//! - `products` - List products matching a category and search phrase
//! - `categories` - List catalog categories
//! - `cart` - Show, add to, change quantities in, or clear the cart
//! - `favourites` - Show or toggle favourites
//!
//! The cart and favourites persist in the storage directory between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront::{Session, ShopConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Shopfront catalog and cart")]
struct Cli {
    /// Catalog location: an http(s) URL or a file path (overrides `SHOP_CATALOG`)
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Directory holding the cart and favourites (overrides `SHOP_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only show this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Only show products whose name or category contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List catalog categories
    Categories,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage favourites
    Favourites {
        #[command(subcommand)]
        action: FavouritesAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },
    /// Add one unit to a product already in the cart
    Inc {
        /// Product id
        id: String,
    },
    /// Remove one unit from a product in the cart (never below 1)
    Dec {
        /// Product id
        id: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum FavouritesAction {
    /// List favourites
    Show,
    /// Add or remove a product
    Toggle {
        /// Product id
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init).
    // --catalog replaces SHOP_CATALOG before it is parsed.
    let config = ShopConfig::from_env_with_catalog(cli.catalog.as_deref());

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so command output on stdout stays clean.
    // Defaults to warnings from the library if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=warn,shopfront_cli=info".into());

    // LOG_FORMAT=json switches to structured output for log collectors
    let is_json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        // Flush Sentry before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ShopConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config;
    if let Some(dir) = cli.storage_dir {
        config = config.with_storage_dir(dir);
    }

    let mut session = Session::from_config(&config).await?;

    let output = match cli.command {
        Commands::Products { category, search } => {
            commands::products::list(&mut session, category.as_deref(), search.as_deref())
        }
        Commands::Categories => commands::products::categories(&session),
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session),
            CartAction::Add { id } => commands::cart::add(&mut session, &id.into()),
            CartAction::Inc { id } => commands::cart::increase(&mut session, &id.into()),
            CartAction::Dec { id } => commands::cart::decrease(&mut session, &id.into()),
            CartAction::Remove { id } => commands::cart::remove(&mut session, &id.into()),
            CartAction::Clear => commands::cart::clear(&mut session),
        },
        Commands::Favourites { action } => match action {
            FavouritesAction::Show => commands::favourites::show(&session),
            FavouritesAction::Toggle { id } => {
                commands::favourites::toggle(&mut session, &id.into())
            }
        },
    };

    println!("{output}");
    Ok(())
}
