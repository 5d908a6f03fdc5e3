use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CARDSPEND_HOME`, or `~/.cardspend`
pub fn cardspend_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CARDSPEND_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cardspend"))
}

pub fn ensure_cardspend_home() -> Result<PathBuf> {
    let dir = cardspend_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
