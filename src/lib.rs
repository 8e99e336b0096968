//! `Reading Companion` - Bible reading progress tracking.
//!
//! This crate provides the flexible reading-reference parser (`"Isa 3-4:15"`,
//! `"3:1,2; 4:15"`), the per-language book catalogs it resolves against, and
//! a terminal test bench for trying inputs.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod bible;
pub mod config;
pub mod constants;
pub mod error;
pub mod reading;
pub mod ui;

pub use bible::{BookCatalog, BookEntry, Language};
pub use reading::{parse_reading_input, ChapterReadEntry, ParseErrorKind, ParseResult, ReadingParser, Suggestion};
