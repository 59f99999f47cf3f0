use std::path::{Path, PathBuf};

use super::types::{AppConfig, SearchProvider};

/// Get the default castmind data directory: ~/.castmind
pub fn get_castmind_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".castmind"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.castmind/config.toml (highest)
    let castmind_dir = get_castmind_data_dir()?;
    let castmind_config = castmind_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if castmind_config.exists() {
        let s = std::fs::read_to_string(&castmind_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Update logging directory to use castmind data directory if not set
    if cfg.logging.file
        && cfg
            .logging
            .directory
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    {
        let logs_dir = castmind_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    // Environment variable overrides (Priority 0: highest)
    let SearchProvider::Service(ref mut svc_cfg) = cfg.search.provider;

    if let Ok(v) = std::env::var("CASTMIND_SEARCH_URL") {
        if !v.trim().is_empty() {
            svc_cfg.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("CASTMIND_SEARCH_API_KEY") {
        if !v.trim().is_empty() {
            svc_cfg.api_key = v;
        }
    }
    if let Ok(v) = std::env::var("CASTMIND_DAILY_BUDGET") {
        if let Ok(budget) = v.trim().parse::<f64>() {
            cfg.budget.daily_budget = budget;
        }
    }

    Ok(cfg)
}
