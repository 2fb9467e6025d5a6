use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored session credentials. Presence of this file is what the client
/// treats as "logged in"; the token is never revalidated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub email: String,
    pub saved_at: DateTime<Utc>,
}

impl Credentials {
    pub fn new(token: String, email: String) -> Self {
        Self {
            token,
            email,
            saved_at: Utc::now(),
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("GUDANG_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("gudang").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

fn credentials_file() -> anyhow::Result<PathBuf> {
    Ok(get_config_dir()?.join("credentials.json"))
}

pub fn load_credentials() -> anyhow::Result<Option<Credentials>> {
    let file = credentials_file()?;

    if !file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(file)?;
    let credentials: Credentials = serde_json::from_str(&content)?;
    Ok(Some(credentials))
}

pub fn save_credentials(credentials: &Credentials) -> anyhow::Result<()> {
    let file = credentials_file()?;
    let content = serde_json::to_string_pretty(credentials)?;
    fs::write(file, content)?;
    Ok(())
}

pub fn delete_credentials() -> anyhow::Result<bool> {
    let file = credentials_file()?;

    if !file.exists() {
        return Ok(false);
    }

    fs::remove_file(file)?;
    Ok(true)
}

/// Base URL of the API server
pub fn api_url() -> String {
    std::env::var("GUDANG_API_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}
