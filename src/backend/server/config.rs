/**
 * Server Configuration
 *
 * This module turns environment variables into a validated [`ServerConfig`].
 *
 * # Configuration Sources
 *
 * Values come from the process environment (a `.env` file is loaded by the
 * binary first). Every variable has a default suitable for local
 * development except the secrets, which stay `None` when unset.
 *
 * # Degraded Startup
 *
 * A missing `DATABASE_URL` does not stop the server: it runs against the
 * in-process store and logs a warning. A missing `SUPABASE_JWT_SECRET`
 * leaves the admin API rejecting every request with 401.
 */

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SITE_URL: &str = "https://carstreet.ca";
pub const DEFAULT_INDEXNOW_KEY: &str = "carstreet-indexnow-key-2024";
pub const DEFAULT_INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/indexnow";
pub const DEFAULT_ADMIN_EMAIL: &str = "info@carstreet.ca";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Which rendering pipeline the server runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
}

impl RunMode {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub mode: RunMode,
    pub port: u16,
    /// Public base path the site is mounted under, always starting and ending with `/`
    pub base: String,
    /// Directory template candidates and built assets are resolved against
    pub root_dir: PathBuf,
    /// Absolute origin used in sitemaps, canonical links and IndexNow
    pub site_url: String,
    pub database_url: Option<String>,
    pub jwt_secret: Option<String>,
    /// Put error details in 500 response bodies
    pub expose_internal_errors: bool,
    /// Front-end dev SSR endpoint; selects the remote renderer in development
    pub ssr_dev_url: Option<String>,
    pub indexnow_key: String,
    pub indexnow_endpoint: String,
    pub smtp_url: Option<String>,
    pub mail_from: String,
    pub admin_email: String,
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mode = match get("APP_ENV").as_deref() {
            None | Some("development") => RunMode::Development,
            Some("production") => RunMode::Production,
            Some(other) => {
                return Err(ConfigError::InvalidValue { name: "APP_ENV", value: other.to_string() })
            }
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value: raw })?,
            None => 3000,
        };

        let expose_internal_errors = match get("EXPOSE_INTERNAL_ERRORS") {
            Some(raw) => parse_bool(&raw)
                .ok_or(ConfigError::InvalidValue { name: "EXPOSE_INTERNAL_ERRORS", value: raw })?,
            None => !mode.is_production(),
        };

        let site_url = get("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        let site_url = url::Url::parse(&site_url)
            .map_err(|_| ConfigError::InvalidValue { name: "SITE_URL", value: site_url.clone() })
            .map(|_| site_url.trim_end_matches('/').to_string())?;

        let config = Self {
            mode,
            port,
            base: normalize_base(get("BASE").as_deref().unwrap_or("/")),
            root_dir: PathBuf::from(get("ROOT_DIR").unwrap_or_else(|| ".".to_string())),
            site_url,
            database_url: get("DATABASE_URL"),
            jwt_secret: get("SUPABASE_JWT_SECRET"),
            expose_internal_errors,
            ssr_dev_url: get("SSR_DEV_URL"),
            indexnow_key: get("INDEXNOW_KEY").unwrap_or_else(|| DEFAULT_INDEXNOW_KEY.to_string()),
            indexnow_endpoint: get("INDEXNOW_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_INDEXNOW_ENDPOINT.to_string()),
            smtp_url: get("SMTP_URL"),
            mail_from: get("MAIL_FROM")
                .unwrap_or_else(|| format!("Car Street <{DEFAULT_ADMIN_EMAIL}>")),
            admin_email: get("ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the values that end up inside route paths
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_base(&self.base) {
            return Err(ConfigError::InvalidValue { name: "BASE", value: self.base.clone() });
        }
        if !is_valid_indexnow_key(&self.indexnow_key) {
            return Err(ConfigError::InvalidValue {
                name: "INDEXNOW_KEY",
                value: self.indexnow_key.clone(),
            });
        }
        Ok(())
    }

    /// Defaults for `mode` with templates and assets under `root_dir`
    pub fn for_root(mode: RunMode, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            port: 3000,
            base: "/".to_string(),
            root_dir: root_dir.into(),
            site_url: DEFAULT_SITE_URL.to_string(),
            database_url: None,
            jwt_secret: None,
            expose_internal_errors: !mode.is_production(),
            ssr_dev_url: None,
            indexnow_key: DEFAULT_INDEXNOW_KEY.to_string(),
            indexnow_endpoint: DEFAULT_INDEXNOW_ENDPOINT.to_string(),
            smtp_url: None,
            mail_from: format!("Car Street <{DEFAULT_ADMIN_EMAIL}>"),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `"shop"` -> `"/shop/"`, `""` -> `"/"`
fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// IndexNow keys are 8 to 128 characters of `[A-Za-z0-9-]`
fn is_valid_indexnow_key(key: &str) -> bool {
    (8..=128).contains(&key.len()) && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// `/`, or segments of `[A-Za-z0-9_-]` that do not start with `api`
fn is_valid_base(base: &str) -> bool {
    if base == "/" {
        return true;
    }
    let segments: Vec<&str> = base.trim_matches('/').split('/').collect();
    segments.first() != Some(&"api")
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}
