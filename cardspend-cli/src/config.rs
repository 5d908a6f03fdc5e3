use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{cardspend_home, ensure_cardspend_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub import: ImportSection,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// Export used when `--csv` is not given
    pub default_csv: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// Rows printed by `cardspend table` without `--limit`
    pub table_limit: usize,
    /// Rows printed by `cardspend merchants` (the breakdown itself holds at most 10)
    pub top_merchants: usize,
    /// Print JSON even without `--json`
    pub json: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            table_limit: 20,
            top_merchants: 10,
            json: false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

pub fn run(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Init => init_config(),
        ConfigCommand::Show => show_config(),
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(cardspend_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_cardspend_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config_from(&p)?;
    let source = if p.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{}", p.display(), source);
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
