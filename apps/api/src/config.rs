use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::matching::NormalizeOptions;
use crate::report::DEFAULT_TOP_MISSING;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Service-wide tokenization default; a request may override it.
    pub normalize: NormalizeOptions,
    pub max_upload_bytes: usize,
    pub report_top_missing: usize,
    /// Enables the file sink when set.
    pub report_export_dir: Option<PathBuf>,
    /// Enables the webhook sink when set.
    pub report_webhook_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            normalize: NormalizeOptions::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            report_top_missing: DEFAULT_TOP_MISSING,
            report_export_dir: None,
            report_webhook_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let strict_alpha_tokens = match optional_env("STRICT_ALPHA_TOKENS") {
            Some(v) => parse_flag(&v)
                .ok_or_else(|| anyhow!("STRICT_ALPHA_TOKENS must be true or false, got '{v}'"))?,
            None => defaults.normalize.strict_alpha_tokens,
        };

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            normalize: NormalizeOptions {
                strict_alpha_tokens,
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            report_top_missing: parse_env("REPORT_TOP_MISSING", defaults.report_top_missing)?,
            report_export_dir: optional_env("REPORT_EXPORT_DIR").map(PathBuf::from),
            report_webhook_url: optional_env("REPORT_WEBHOOK_URL"),
        })
    }
}

/// Accepts the usual spellings of a boolean switch.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
