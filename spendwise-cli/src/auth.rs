use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AuthState {
    pub gemini_api_key: Option<String>,
}

fn auth_path(home: &Path) -> PathBuf {
    home.join("auth.json")
}

pub fn load_auth(home: &Path) -> Result<AuthState> {
    let p = auth_path(home);
    if !p.exists() {
        return Ok(AuthState::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn save_auth(home: &Path, auth: &AuthState) -> Result<()> {
    let p = auth_path(home);
    let s = serde_json::to_string_pretty(auth)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// `GEMINI_API_KEY` wins over the stored key. Blank values count as missing.
pub fn resolve_api_key(env_value: Option<String>, stored: &AuthState) -> Option<String> {
    env_value
        .or_else(|| stored.gemini_api_key.clone())
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

pub fn api_key(home: &Path) -> Result<Option<String>> {
    let stored = load_auth(home)?;
    Ok(resolve_api_key(std::env::var(API_KEY_ENV).ok(), &stored))
}

fn prompt_secret(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn paste_gemini_key(home: &Path) -> Result<()> {
    let mut auth = load_auth(home)?;
    let key = prompt_secret("Paste Gemini API key")?;
    if key.is_empty() || key.contains(char::is_whitespace) {
        bail!("key looked empty or contained whitespace");
    }
    auth.gemini_api_key = Some(key);
    save_auth(home, &auth)?;
    println!("Saved Gemini API key to {}", auth_path(home).display());
    Ok(())
}
