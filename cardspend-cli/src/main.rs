use anyhow::{bail, Result};
use cardspend_core::{FilterSelection, TransactionStore};
use cardspend_finance::Dashboard;
use cardspend_ingest::parse_csv_path;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod args;
mod config;
mod render;
mod state;

use args::{Cli, Command, Source};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = config::load_config()?;
    let json = cli.json || cfg.display.json;

    match cli.command {
        Command::Summary { source } => {
            let store = load_store(&source, &cfg)?;
            let d = Dashboard::build(&store);
            if json {
                #[derive(Serialize)]
                struct Summary<'a> {
                    selection: &'a FilterSelection,
                    #[serde(flatten)]
                    totals: &'a cardspend_finance::Totals,
                    top_category: &'a str,
                }
                print_json(&Summary {
                    selection: &d.selection,
                    totals: &d.totals,
                    top_category: &d.top_category,
                })?;
            } else {
                print!("{}", render::summary(&d));
            }
        }

        Command::Monthly { source } => {
            let store = load_store(&source, &cfg)?;
            let d = Dashboard::build(&store);
            if json {
                print_json(&d.monthly)?;
            } else {
                print!("{}", render::monthly(&d));
            }
        }

        Command::Categories { source } => {
            let store = load_store(&source, &cfg)?;
            let d = Dashboard::build(&store);
            if json {
                print_json(&d.categories)?;
            } else {
                print!("{}", render::categories(&d));
            }
        }

        Command::Merchants { source } => {
            let store = load_store(&source, &cfg)?;
            let d = Dashboard::build(&store);
            if json {
                print_json(&d.merchants)?;
            } else {
                print!("{}", render::merchants(&d, cfg.display.top_merchants));
            }
        }

        Command::Statuses { source } => {
            let store = load_store(&source, &cfg)?;
            let d = Dashboard::build(&store);
            if json {
                print_json(&d.statuses)?;
            } else {
                print!("{}", render::statuses(&d));
            }
        }

        Command::Table { source, limit } => {
            let store = load_store(&source, &cfg)?;
            let d = Dashboard::build(&store);
            let limit = limit.unwrap_or(cfg.display.table_limit);
            if json {
                let rows: Vec<_> = d.table.iter().take(limit).collect();
                print_json(&rows)?;
            } else {
                print!("{}", render::table(&d, limit));
            }
        }

        Command::Filters { source } => {
            let store = load_store(&source, &cfg)?;
            let d = Dashboard::build(&store);
            if json {
                print_json(&d.options)?;
            } else {
                print!("{}", render::filters(&d));
            }
        }

        Command::Dashboard { source } => {
            let store = load_store(&source, &cfg)?;
            let d = Dashboard::build(&store);
            if json {
                print_json(&d)?;
            } else {
                print!(
                    "{}",
                    render::dashboard(&d, cfg.display.table_limit, cfg.display.top_merchants)
                );
            }
        }

        Command::Config { command } => config::run(command)?,
    }

    Ok(())
}

// Priority: RUST_LOG > --verbose > warn
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn resolve_csv(source: &Source, cfg: &Config) -> PathBuf {
    source
        .csv
        .clone()
        .or_else(|| cfg.import.default_csv.clone())
        .unwrap_or_else(|| PathBuf::from("export.csv"))
}

fn load_store(source: &Source, cfg: &Config) -> Result<TransactionStore> {
    let csv_path = resolve_csv(source, cfg);
    if !csv_path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv_path.display());
    }

    let import = parse_csv_path(&csv_path)?;
    if !import.warnings.is_empty() {
        tracing::warn!(
            count = import.warnings.len(),
            "some rows in {} were malformed",
            csv_path.display()
        );
    }
    tracing::info!(
        rows = import.transactions.len(),
        "loaded {}",
        csv_path.display()
    );

    let mut store = TransactionStore::from_transactions(import.transactions);
    store.set_selection(source.selection());
    Ok(store)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
