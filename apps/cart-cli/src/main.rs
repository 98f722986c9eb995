//! # RocketShoes CLI
//!
//! Terminal shell around the cart store. Each invocation opens the store,
//! applies at most one mutation and prints the resulting cart.
//!
//! ## Commands
//! ```text
//! rocketshoes show [--json]          Print the persisted cart
//! rocketshoes add <id>               Add one unit of a product
//! rocketshoes remove <id>            Remove a product's line
//! rocketshoes update <id> <amount>   Set a product's amount (<= 0 is ignored)
//! rocketshoes config [--write]       Print (or save) the effective config
//! ```
//!
//! Notifications go to stderr; the process exits with status 1 when one was
//! emitted.

mod render;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rocketshoes_cart::{
    CartConfig, CartStore, CatalogService, FileSlot, HttpCatalog, InMemoryCatalog, Notifier,
    StoreSettings,
};
use rocketshoes_core::ProductId;

/// RocketShoes storefront cart
#[derive(Parser)]
#[command(name = "rocketshoes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file path (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Serve products and stock from a JSON fixture instead of the API
    #[arg(long, global = true)]
    catalog_file: Option<PathBuf>,

    /// Log store activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show {
        /// Print the cart as the JSON array stored in the slot
        #[arg(long)]
        json: bool,
    },

    /// Add one unit of a product
    Add { id: u32 },

    /// Remove a product from the cart
    Remove { id: u32 },

    /// Set the amount of a product already in the cart
    Update {
        id: u32,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Print the effective configuration
    Config {
        /// Save it to the config file
        #[arg(long)]
        write: bool,
    },
}

// =============================================================================
// Notifier
// =============================================================================

/// Prints notifications to stderr and remembers how many were shown.
#[derive(Default)]
struct StderrNotifier {
    shown: AtomicUsize,
}

impl StderrNotifier {
    fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        self.shown.fetch_add(1, Ordering::SeqCst);
        eprintln!("error: {}", message);
    }
}

// =============================================================================
// Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CartConfig::load(cli.config.clone()).context("loading cart config")?;
    debug!(?config, "Configuration loaded");

    if let Commands::Config { write } = cli.command {
        print!("{}", toml::to_string_pretty(&config)?);
        if write {
            config.save(cli.config)?;
        }
        return Ok(());
    }

    let catalog: Arc<dyn CatalogService> = match &cli.catalog_file {
        Some(path) => Arc::new(
            InMemoryCatalog::from_file(path)
                .with_context(|| format!("reading catalog fixture {}", path.display()))?,
        ),
        None => Arc::new(HttpCatalog::from_settings(&config.catalog)?),
    };

    let slot = match &config.storage.dir {
        Some(dir) => FileSlot::new(dir),
        None => FileSlot::in_data_dir()?,
    };
    debug!(dir = %slot.dir().display(), "Using file slot");

    let notifier = Arc::new(StderrNotifier::default());
    let store = CartStore::open(
        catalog,
        Arc::new(slot),
        notifier.clone(),
        StoreSettings::from(&config),
    );

    let mut json = false;
    match cli.command {
        Commands::Show { json: as_json } => json = as_json,
        Commands::Add { id } => store.add(ProductId::new(id)).await,
        Commands::Remove { id } => store.remove(ProductId::new(id)).await,
        Commands::Update { id, amount } => store.update_amount(ProductId::new(id), amount).await,
        Commands::Config { .. } => {}
    }

    let cart = store.cart();
    if json {
        println!("{}", serde_json::to_string_pretty(cart.as_ref())?);
    } else {
        print!("{}", render::cart_table(&cart));
    }

    if notifier.shown() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Initializes the tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info,rocketshoes=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_update_accepts_negative_amount() {
        let cli = Cli::try_parse_from(["rocketshoes", "update", "3", "-5"]).unwrap();
        assert!(matches!(cli.command, Commands::Update { id: 3, amount: -5 }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rocketshoes",
            "add",
            "7",
            "--catalog-file",
            "fixtures/catalog.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Add { id: 7 }));
        assert_eq!(cli.catalog_file, Some(PathBuf::from("fixtures/catalog.json")));
    }

    #[tokio::test]
    async fn test_bundled_fixture_drives_the_store() {
        let catalog = InMemoryCatalog::from_json(include_str!("../fixtures/catalog.json")).unwrap();
        let notifier = Arc::new(StderrNotifier::default());
        let store = CartStore::open(
            Arc::new(catalog),
            Arc::new(rocketshoes_cart::MemorySlot::new()),
            notifier.clone(),
            StoreSettings::default(),
        );

        store.add(ProductId::new(3)).await;
        store.add(ProductId::new(3)).await;
        store.add(ProductId::new(3)).await;

        assert_eq!(store.cart().amount_of(ProductId::new(3)), 2);
        assert_eq!(notifier.shown(), 1);
    }

    #[test]
    fn test_stderr_notifier_counts() {
        let notifier = StderrNotifier::default();
        notifier.error("Requested amount is out of stock");
        assert_eq!(notifier.shown(), 1);
    }
}
