//! Configuration loading from environment variables.

use crate::constants::{DEFAULT_MAX_PROJECT_SIZE, DEFAULT_PORT, DEFAULT_PREVIEW_DEBOUNCE_MS};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime configuration for WebLab.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_project_size: usize,
    pub preview_debounce_ms: u64,
    /// Origin used when building share URLs (no trailing slash).
    pub public_origin: String,
}

fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    for key in ["HOME", "USERPROFILE"] {
        if let Ok(value) = env::var(key) {
            if !value.trim().is_empty() {
                return Some(PathBuf::from(value));
            }
        }
    }
    std::env::current_dir().ok()
}

fn default_db_path() -> String {
    let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".cache")
        .join("weblab")
        .join("db")
        .to_string_lossy()
        .to_string()
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}='{}'; using the default", name, value);
            None
        }
    }
}

/// Strip trailing slashes so `origin + path` never doubles them.
pub fn normalize_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_string()
}

/// Parse a boolean-like environment flag value.
///
/// Truthy: `1`, `true`, `yes`, `on`. Falsy: `0`, `false`, `no`, `off`, empty.
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment; missing or unrecognized is `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        let port = parse_env("PORT").unwrap_or(DEFAULT_PORT);
        let public_origin = env::var("PUBLIC_ORIGIN")
            .ok()
            .map(|origin| normalize_origin(&origin))
            .filter(|origin| !origin.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{}", port));
        Self {
            db_path: env::var("DB_PATH")
                .map(expand_tilde)
                .unwrap_or_else(|_| default_db_path()),
            port,
            max_project_size: parse_env("MAX_PROJECT_SIZE").unwrap_or(DEFAULT_MAX_PROJECT_SIZE),
            preview_debounce_ms: parse_env("PREVIEW_DEBOUNCE_MS")
                .unwrap_or(DEFAULT_PREVIEW_DEBOUNCE_MS),
            public_origin,
        }
    }
}
