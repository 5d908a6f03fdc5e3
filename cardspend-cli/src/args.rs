use cardspend_core::{FilterSelection, Selection, MONTH_NAMES};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigCommand;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARDSPEND_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "cardspend",
    version = VERSION,
    about = "Spend dashboard for card transaction CSV exports"
)]
pub struct Cli {
    /// Debug logging (RUST_LOG wins if set)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Total cleared spend, transaction count, average and top category
    Summary {
        #[command(flatten)]
        source: Source,
    },

    /// Spend per month with the top-merchant split
    Monthly {
        #[command(flatten)]
        source: Source,
    },

    /// Spend per category, largest first
    Categories {
        #[command(flatten)]
        source: Source,
    },

    /// Top merchants by spend
    Merchants {
        #[command(flatten)]
        source: Source,
    },

    /// Transaction count per status
    Statuses {
        #[command(flatten)]
        source: Source,
    },

    /// Filtered transactions, newest first
    Table {
        #[command(flatten)]
        source: Source,

        /// Max rows (default from config display.table_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Values available for each filter
    Filters {
        #[command(flatten)]
        source: Source,
    },

    /// Every view at once
    Dashboard {
        #[command(flatten)]
        source: Source,
    },

    /// Inspect or create ~/.cardspend/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Which export to read and how to filter it
#[derive(Args, Debug, Clone)]
pub struct Source {
    /// Path to the card export CSV (defaults to config import.default_csv, then ./export.csv)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Calendar year, or "all"
    #[arg(long, default_value = "all", value_parser = parse_year)]
    pub year: Selection<i32>,

    /// Month as 1-12 or a name like "Mar", or "all"
    #[arg(long, default_value = "all", value_parser = parse_month)]
    pub month: Selection<u32>,

    /// Exact merchant name, or "all"
    #[arg(long, default_value = "all", value_parser = parse_text)]
    pub merchant: Selection<String>,

    /// Exact category name, or "all"
    #[arg(long, default_value = "all", value_parser = parse_text)]
    pub category: Selection<String>,
}

impl Source {
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            year: self.year.clone(),
            month: self.month.clone(),
            merchant: self.merchant.clone(),
            category: self.category.clone(),
        }
    }
}

fn parse_year(s: &str) -> Result<Selection<i32>, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn parse_text(s: &str) -> Result<Selection<String>, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Accepts "all", 1-12, or a month name/abbreviation. Returns a 0-based month.
fn parse_month(s: &str) -> Result<Selection<u32>, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case(cardspend_core::ALL) {
        return Ok(Selection::All);
    }
    if let Ok(n) = s.parse::<u32>() {
        return match n {
            1..=12 => Ok(Selection::Only(n - 1)),
            _ => Err(format!("month must be 1-12, got {n}")),
        };
    }
    let lower = s.to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| lower.len() >= 3 && lower.starts_with(&name.to_ascii_lowercase()))
        .map(|i| Selection::Only(i as u32))
        .ok_or_else(|| format!("unknown month '{s}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_forms() {
        assert_eq!(parse_month("all"), Ok(Selection::All));
        assert_eq!(parse_month("3"), Ok(Selection::Only(2)));
        assert_eq!(parse_month("Mar"), Ok(Selection::Only(2)));
        assert_eq!(parse_month("december"), Ok(Selection::Only(11)));
        assert!(parse_month("13").is_err());
        assert!(parse_month("0").is_err());
        assert!(parse_month("Ma").is_err());
    }

    #[test]
    fn test_cli_filters() {
        let cli = Cli::try_parse_from([
            "cardspend",
            "summary",
            "--csv",
            "export.csv",
            "--year",
            "2024",
            "--month",
            "jan",
            "--merchant",
            "Acme",
        ])
        .unwrap();
        let Command::Summary { source } = cli.command else {
            panic!("expected summary");
        };
        let sel = source.selection();
        assert_eq!(sel.year, Selection::Only(2024));
        assert_eq!(sel.month, Selection::Only(0));
        assert_eq!(sel.merchant, Selection::Only("Acme".to_string()));
        assert_eq!(sel.category, Selection::All);
    }

    #[test]
    fn test_cli_defaults_to_unfiltered() {
        let cli = Cli::try_parse_from(["cardspend", "--json", "dashboard"]).unwrap();
        assert!(cli.json);
        let Command::Dashboard { source } = cli.command else {
            panic!("expected dashboard");
        };
        assert!(source.selection().is_unfiltered());
        assert!(source.csv.is_none());
    }

    #[test]
    fn test_cli_rejects_bad_year() {
        assert!(Cli::try_parse_from(["cardspend", "summary", "--year", "soon"]).is_err());
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_carries_build_sha() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let version = cmd.get_version().unwrap_or_default();
        assert!(version.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(version.ends_with(&format!("({})", env!("CARDSPEND_BUILD_SHA"))));
    }
}
