use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use spendwise_core::ExpenseLedger;

/// `$SPENDWISE_HOME`, else `~/.spendwise`.
pub fn spendwise_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SPENDWISE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendwise"))
}

pub fn ensure_spendwise_home() -> Result<PathBuf> {
    let dir = spendwise_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn ledger_path(home: &Path) -> PathBuf {
    home.join("expenses.json")
}

/// Missing file is an empty ledger.
pub fn load_ledger(path: &Path) -> Result<ExpenseLedger> {
    if !path.exists() {
        return Ok(ExpenseLedger::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_ledger(path: &Path, ledger: &ExpenseLedger) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger)?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
