use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use spendwise_ai::AiSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ai: AiSettings,
    pub app: AppSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSection {
    /// IANA zone used to decide what "today" means
    pub timezone: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        self.app
            .timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid timezone {:?}: {e}", self.app.timezone))
    }
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn load_config(home: &Path) -> Result<Config> {
    let p = config_path(home);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(home: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(home);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(home: &Path) -> Result<()> {
    let p = config_path(home);
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(home, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
