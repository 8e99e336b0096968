//! Bible book catalogs.
//!
//! A catalog is the ordered list of the 66 books for one language, with the
//! names, abbreviations and chapter counts the reading parser resolves
//! against. Catalogs are loaded once and only ever read afterwards.

pub mod catalog;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::catalog::{BOOK_COUNT, DEFAULT_LANGUAGE};
use crate::error::{Error, Result};

pub use catalog::{CatalogProvider, LanguageCatalogs};

/// Supported catalog languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// German
    De,
    /// English
    En,
    /// Spanish
    Es,
    /// Italian
    It,
    /// French
    Fr,
}

impl Default for Language {
    fn default() -> Self {
        Self::from_code(DEFAULT_LANGUAGE).unwrap_or(Self::De)
    }
}

impl Language {
    /// All supported languages in display order.
    pub const fn all() -> &'static [Self] {
        &[Self::De, Self::En, Self::Es, Self::It, Self::Fr]
    }

    /// Short language code as used in catalog file names.
    pub const fn code(self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
            Self::Es => "es",
            Self::It => "it",
            Self::Fr => "fr",
        }
    }

    /// Native display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::De => "Deutsch",
            Self::En => "English",
            Self::Es => "Español",
            Self::It => "Italiano",
            Self::Fr => "Français",
        }
    }

    /// Parse a language code such as `"en"` or `"DE"`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::all().iter().copied().find(|l| l.code() == code)
    }

    /// Next language in display order, wrapping around.
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|l| *l == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    /// Catalog compiled into the binary for this language.
    pub(crate) const fn embedded_json(self) -> &'static str {
        match self {
            Self::De => include_str!("../../data/bible-books-de.json"),
            Self::En => include_str!("../../data/bible-books-en.json"),
            Self::Es => include_str!("../../data/bible-books-es.json"),
            Self::It => include_str!("../../data/bible-books-it.json"),
            Self::Fr => include_str!("../../data/bible-books-fr.json"),
        }
    }
}

/// One Bible book in a language catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookEntry {
    /// Canonical book number (1-66), the same in every language.
    pub number: u8,
    /// Display name, e.g. "1 Timothy".
    pub name: String,
    /// Short form, e.g. "1Ti.". Compared without periods.
    pub abbreviation: String,
    /// Additional accepted spellings.
    #[serde(default)]
    pub alternative_names: Vec<String>,
    /// Total number of chapters.
    pub chapters: u16,
}

impl BookEntry {
    /// Create an entry without alternative names.
    pub fn new(number: u8, name: impl Into<String>, abbreviation: impl Into<String>, chapters: u16) -> Self {
        Self {
            number,
            name: name.into(),
            abbreviation: abbreviation.into(),
            alternative_names: Vec::new(),
            chapters,
        }
    }

    /// Builder-style helper adding alternative names.
    #[must_use]
    pub fn with_alternatives<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternative_names.extend(names.into_iter().map(Into::into));
        self
    }
}

/// On-disk shape of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    language: Option<String>,
    books: Vec<BookEntry>,
}

/// An ordered, validated list of books for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookCatalog {
    language: Option<String>,
    books: Vec<BookEntry>,
}

impl BookCatalog {
    /// Build a catalog from entries, validating numbers and chapter counts.
    ///
    /// A catalog may hold fewer than 66 books (useful for tests and partial
    /// translations) but every number must be unique and in `1..=66`.
    pub fn from_books(books: Vec<BookEntry>) -> Result<Self> {
        Self::validated("<memory>", None, books)
    }

    /// Decode a catalog from JSON (`{ "books": [...] }`).
    pub fn from_json_str(source_name: &str, json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| Error::catalog(source_name, e.to_string()))?;
        Self::validated(source_name, file.language, file.books)
    }

    /// Load and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let catalog = Self::from_json_str(&name, &content)?;
        tracing::info!("Loaded {} books from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The catalog compiled into the binary for `language`.
    pub fn embedded(language: Language) -> Result<Self> {
        let label = format!("embedded {} catalog", language.code());
        Self::from_json_str(&label, language.embedded_json())
    }

    fn validated(source_name: &str, language: Option<String>, books: Vec<BookEntry>) -> Result<Self> {
        let mut seen = [false; BOOK_COUNT as usize + 1];
        for book in &books {
            if book.number == 0 || book.number > BOOK_COUNT {
                return Err(Error::catalog(
                    source_name,
                    format!("book '{}' has number {} outside 1-{BOOK_COUNT}", book.name, book.number),
                ));
            }
            let slot = &mut seen[usize::from(book.number)];
            if *slot {
                return Err(Error::catalog(source_name, format!("duplicate book number {}", book.number)));
            }
            *slot = true;
            if book.chapters == 0 {
                return Err(Error::catalog(source_name, format!("book '{}' has no chapters", book.name)));
            }
            if book.name.trim().is_empty() {
                return Err(Error::catalog(source_name, format!("book {} has an empty name", book.number)));
            }
        }
        Ok(Self { language, books })
    }

    /// Language code recorded in the catalog file, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Books in catalog order.
    pub fn books(&self) -> &[BookEntry] {
        &self.books
    }

    /// Iterate over books in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, BookEntry> {
        self.books.iter()
    }

    /// Look up a book by its canonical number.
    pub fn by_number(&self, number: u8) -> Option<&BookEntry> {
        self.books.iter().find(|b| b.number == number)
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog holds no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl<'a> IntoIterator for &'a BookCatalog {
    type Item = &'a BookEntry;
    type IntoIter = std::slice::Iter<'a, BookEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}
