use anyhow::{anyhow, Context, Result};

use crate::masonry::{DEFAULT_COLUMNS, MAX_COLUMNS};

/// Upper bound on `count` accepted by the layout endpoint.
pub const DEFAULT_MAX_PHOTO_COUNT: usize = 5000;

/// Service configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Column count used when a request omits `columns`.
    pub default_columns: usize,
    /// Largest collection the layout endpoint will compute.
    pub max_photo_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            default_columns: DEFAULT_COLUMNS,
            max_photo_count: DEFAULT_MAX_PHOTO_COUNT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            default_columns: parse_columns("DEFAULT_COLUMNS", defaults.default_columns)?,
            max_photo_count: parse_env("MAX_PHOTO_COUNT", defaults.max_photo_count)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Like `parse_env`, but the value must be a grid width the layout endpoint accepts.
fn parse_columns(key: &str, default: usize) -> Result<usize> {
    let columns = parse_env(key, default)?;
    if !(1..=MAX_COLUMNS).contains(&columns) {
        return Err(anyhow!("must be between 1 and {MAX_COLUMNS}, got {columns}"))
            .with_context(|| format!("invalid {key}"));
    }
    Ok(columns)
}
