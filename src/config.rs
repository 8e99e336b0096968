//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::bible::{Language, LanguageCatalogs};
use crate::constants::bench::DEFAULT_HISTORY_LIMIT;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Language whose book catalog is used for parsing
    pub language: Language,
    /// Directory with `bible-books-<code>.json` overrides
    pub catalog_dir: Option<PathBuf>,
    /// How many past parses the test bench keeps
    pub history_limit: usize,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            language: Language::default(),
            catalog_dir: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(code) = env::var("READING_LANGUAGE") {
            config.language = Language::from_code(&code).unwrap_or_else(|| {
                tracing::warn!("Unknown READING_LANGUAGE '{code}', using {}", Language::default().code());
                Language::default()
            });
        }

        // Catalog directory: env var override, or the platform data dir if it has one
        config.catalog_dir = match env::var("BOOK_CATALOG_DIR") {
            Ok(path) => {
                let p = PathBuf::from(shellexpand::tilde(&path).to_string());
                if !p.is_dir() {
                    return Err(Error::config(
                        format!("BOOK_CATALOG_DIR {} is not a directory", p.display()),
                        "Point it at a directory holding bible-books-<code>.json files",
                    ));
                }
                Some(p)
            }
            Err(_) => default_catalog_dir(),
        };

        if let Ok(limit) = env::var("HISTORY_LIMIT") {
            config.history_limit = parse_history_limit(&limit)?;
        }

        Ok(config)
    }

    /// Load the book catalogs this configuration points at.
    pub fn catalogs(&self) -> Result<LanguageCatalogs> {
        LanguageCatalogs::load(self.language, self.catalog_dir.as_deref())
    }
}

fn parse_history_limit(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(Error::config(
            format!("Invalid HISTORY_LIMIT '{value}'"),
            "Expected a positive whole number",
        )),
    }
}

/// `<data dir>/reading-companion/catalogs`, when it exists
fn default_catalog_dir() -> Option<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(env!("CARGO_PKG_NAME")).join("catalogs"))
        .filter(|p| p.is_dir())
}
