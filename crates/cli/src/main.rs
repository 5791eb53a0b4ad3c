//! PriceMate CLI - grocery price comparison and shopping list tools.
//!
//! # Usage
//!
//! ```bash
//! # Compare one product's prices across stores
//! pricemate compare --catalog catalog.json --barcode 0628915410034
//!
//! # Summarize a shopping list
//! pricemate list summary --file list.yaml --category dairy
//!
//! # Check price alerts against the catalog
//! pricemate alerts check --catalog catalog.json --alerts alerts.json
//!
//! # Look up scanned barcodes
//! pricemate scan --catalog catalog.json 0628915410034 06289154
//! ```
//!
//! # Commands
//!
//! - `compare` - Ranked price comparison for one product
//! - `list summary` - Progress and estimated total of a shopping list
//! - `alerts check` - Evaluate price alerts and print notifications
//! - `scan` - Look up barcodes and show recent scans
//!
//! Data files are JSON, or YAML when the extension is `.yaml`/`.yml`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CliConfig;
use crate::error::CliError;

mod commands;
mod config;
mod data;
mod error;

#[derive(Parser)]
#[command(name = "pricemate")]
#[command(author, version, about = "PriceMate grocery price tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a product's prices across stores
    Compare {
        /// Product catalog file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Product barcode
        #[arg(short, long)]
        barcode: String,
    },
    /// Work with shopping lists
    List {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Work with price alerts
    Alerts {
        #[command(subcommand)]
        action: AlertsAction,
    },
    /// Look up scanned barcodes in the catalog
    Scan {
        /// Product catalog file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Barcodes in scan order
        #[arg(required = true)]
        barcodes: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// Show progress and estimated total
    Summary {
        /// Shopping list file
        #[arg(short, long)]
        file: PathBuf,

        /// Only include one category (produce, dairy, meat, ...)
        #[arg(short, long)]
        category: Option<String>,

        /// Unit price assumed for items without a target price
        #[arg(long)]
        default_price: Option<String>,
    },
}

#[derive(Subcommand)]
enum AlertsAction {
    /// Evaluate active alerts against current prices
    Check {
        /// Product catalog file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Price alerts file
        #[arg(short, long)]
        alerts: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Config first: it decides the log format. A config error is reported
    // through the text logger.
    let config = CliConfig::from_env();
    let json_logs = config.as_ref().is_ok_and(|c| c.json_logs);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pricemate_cli=info,pricemate_core=info".into());
    let json_layer = json_logs.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CliConfig) -> Result<(), CliError> {
    match cli.command {
        Commands::Compare { catalog, barcode } => {
            commands::compare::run(&catalog, &barcode, config).await?;
        }
        Commands::List { action } => match action {
            ListAction::Summary {
                file,
                category,
                default_price,
            } => {
                commands::list::summary(
                    &file,
                    category.as_deref(),
                    default_price.as_deref(),
                    config,
                )
                .await?;
            }
        },
        Commands::Alerts { action } => match action {
            AlertsAction::Check { catalog, alerts } => {
                commands::alerts::check(&catalog, &alerts).await?;
            }
        },
        Commands::Scan { catalog, barcodes } => {
            commands::scan::run(&catalog, &barcodes, config).await?;
        }
    }
    Ok(())
}
