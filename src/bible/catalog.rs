//! Catalog provider.
//!
//! The reading parser never looks up the active language itself; callers ask
//! a [`CatalogProvider`] for the catalog and pass it in explicitly.

use std::collections::HashMap;
use std::path::Path;

use super::{BookCatalog, Language};
use crate::constants::catalog::FILE_NAME_PATTERN;
use crate::error::Result;

/// Trait for book catalog providers.
///
/// Implementations hand out fully loaded, read-only catalogs.
pub trait CatalogProvider {
    /// Catalog for `language`. Unknown languages fall back to the default.
    fn books(&self, language: Language) -> &BookCatalog;

    /// The language currently selected by the user.
    fn current_language(&self) -> Language;

    /// Catalog for the current language.
    fn current_books(&self) -> &BookCatalog {
        self.books(self.current_language())
    }
}

/// All language catalogs, loaded up front
#[derive(Debug, Clone)]
pub struct LanguageCatalogs {
    catalogs: HashMap<Language, BookCatalog>,
    fallback: BookCatalog,
    current: Language,
}

impl LanguageCatalogs {
    /// Load the catalogs compiled into the binary.
    pub fn embedded(current: Language) -> Result<Self> {
        Self::load(current, None)
    }

    /// Load every language, preferring `bible-books-<code>.json` files in
    /// `override_dir` over the embedded catalogs when present.
    pub fn load(current: Language, override_dir: Option<&Path>) -> Result<Self> {
        let mut catalogs = HashMap::new();
        for &language in Language::all() {
            let file = override_dir
                .map(|dir| dir.join(FILE_NAME_PATTERN.replace("{code}", language.code())))
                .filter(|p| p.is_file());
            let catalog = match file {
                Some(path) => BookCatalog::load(&path)?,
                None => BookCatalog::embedded(language)?,
            };
            catalogs.insert(language, catalog);
        }

        let fallback = match catalogs.get(&Language::default()) {
            Some(c) => c.clone(),
            None => BookCatalog::embedded(Language::default())?,
        };

        Ok(Self { catalogs, fallback, current })
    }

    /// Change the active language.
    pub fn set_current_language(&mut self, language: Language) {
        tracing::debug!("Switching catalog language to {}", language.code());
        self.current = language;
    }
}

impl CatalogProvider for LanguageCatalogs {
    fn books(&self, language: Language) -> &BookCatalog {
        self.catalogs.get(&language).unwrap_or_else(|| {
            tracing::warn!("No catalog for {}, using default", language.code());
            &self.fallback
        })
    }

    fn current_language(&self) -> Language {
        self.current
    }
}
