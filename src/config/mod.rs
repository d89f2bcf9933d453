mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding `tmdb.api_key`
pub const TMDB_API_KEY_ENV: &str = "MEDIASCOUT_TMDB_API_KEY";

/// Environment variable overriding `rawg.api_key`
pub const RAWG_API_KEY_ENV: &str = "MEDIASCOUT_RAWG_API_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    warn_missing_keys(&config);

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = ["./mediascout.toml", "~/.config/mediascout/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    let mut config = Config::default();
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    warn_missing_keys(&config);
    Ok(config)
}

/// Fill API keys from the environment. Non-empty variables win over the file.
fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(TMDB_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.tmdb.api_key = key;
    }
    if let Some(key) = lookup(RAWG_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.rawg.api_key = key;
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    let search = &config.search;

    if search.max_results == 0 {
        anyhow::bail!("search.max_results cannot be 0");
    }

    if search.min_chars == 0 {
        anyhow::bail!("search.min_chars cannot be 0");
    }

    if search.place_min_chars < search.min_chars {
        anyhow::bail!(
            "search.place_min_chars ({}) cannot be lower than search.min_chars ({})",
            search.place_min_chars,
            search.min_chars
        );
    }

    Ok(())
}

fn warn_missing_keys(config: &Config) {
    if config.tmdb.api_key.trim().is_empty() {
        tracing::warn!("No TMDB API key configured; movie and TV search are disabled");
    }

    if config.rawg.api_key.trim().is_empty() {
        tracing::warn!("No RAWG API key configured; game search is disabled");
    }
}
