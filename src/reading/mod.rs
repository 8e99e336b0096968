//! Reading-reference parsing.
//!
//! Turns free text such as `"Isa 3-4:15"`, `"1 Tim 3:1,2; 4:15"` or `"9-10"`
//! into the chapters that were read. Separators:
//!
//! - `,` joins verses (`3:1,2` = verses 1 and 2)
//! - `;` separates references (`3:1; 4:15`)
//! - `-` is a range (`3-5`, `3:1-5`)
//!
//! A leading book name is resolved against the catalog passed in by the
//! caller; without one the caller's default book (if any) applies.
//!
//! ```text
//! "3"        → chapter 3 complete
//! "3-5"      → chapters 3, 4, 5 complete
//! "3-4:15"   → chapter 3 complete, chapter 4 up to verse 15
//! "Isa 3:1,2; 4:15" → Isaiah 3 up to verse 2, Isaiah 4 up to verse 15
//! ```

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

pub mod distance;
pub mod progress;
pub mod reference;
pub mod resolver;
pub mod types;
pub mod verses;

use lazy_static::lazy_static;
use regex::Regex;

use crate::bible::{BookCatalog, BookEntry};

pub use distance::distance;
pub use progress::{format_chapter_status, merge_chapter_entries, next_reading};
pub use reference::{parse_reference, Rejection};
pub use resolver::{resolve_book, BookMatch, Confidence};
pub use types::{ChapterReadEntry, ChapterSuggestion, ParseErrorKind, ParseResult, ReadStatus, Suggestion};
pub use verses::max_verse;

lazy_static! {
    /// Optional 1-3 prefix, a letter, then letters/spaces/periods (lazy),
    /// whitespace, and a digit-leading remainder.
    static ref BOOK_PREFIX: Regex =
        Regex::new(r"^([1-3]?\s*\p{L}[\p{L}\s.]*?)\s+([0-9].*)$").unwrap();
}

/// Book name the prefix split accepts, for rebuilding input text.
///
/// Prefers the display name; a name the split cannot take ("4 Mose") falls
/// back to the first alternative name that it can.
pub(crate) fn book_token(book: &BookEntry) -> &str {
    std::iter::once(&book.name)
        .chain(&book.alternative_names)
        .find(|name| splits_as_book(name))
        .map_or(book.name.as_str(), String::as_str)
}

fn splits_as_book(name: &str) -> bool {
    BOOK_PREFIX
        .captures(&format!("{name} 1"))
        .and_then(|caps| caps.get(1))
        .is_some_and(|m| m.as_str() == name)
}

/// Reading parser bound to one book catalog
#[derive(Debug, Clone, Copy)]
pub struct ReadingParser<'a> {
    catalog: &'a BookCatalog,
}

impl<'a> ReadingParser<'a> {
    /// Create a parser resolving book names against `catalog`.
    pub const fn new(catalog: &'a BookCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog book names are resolved against.
    pub const fn catalog(&self) -> &'a BookCatalog {
        self.catalog
    }

    /// Resolve a book name on its own.
    pub fn resolve_book(&self, input: &str) -> BookMatch<'a> {
        resolve_book(input, self.catalog)
    }

    /// Parse one reading input.
    ///
    /// `default_book` applies when the input does not start with a book
    /// name. Every failure is reported in the returned [`ParseResult`].
    pub fn parse(&self, input: &str, default_book: Option<&BookEntry>) -> ParseResult {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ParseErrorKind::InvalidInput.into();
        }

        let mut book = default_book;
        let mut reference_text = trimmed;

        if let Some(caps) = BOOK_PREFIX.captures(trimmed) {
            let (Some(book_input), Some(remainder)) = (caps.get(1), caps.get(2)) else {
                return ParseErrorKind::ParsingError.into();
            };
            let book_input = book_input.as_str();
            let remainder = remainder.as_str();
            let found = self.resolve_book(book_input);

            match (found.confidence, found.book) {
                (Confidence::Exact | Confidence::High, Some(resolved)) => {
                    book = Some(resolved);
                    reference_text = remainder;
                }
                (Confidence::Medium, _) => {
                    return Suggestion::DidYouMean {
                        input: book_input.to_string(),
                        candidates: found.suggestions.into_iter().cloned().collect(),
                        remainder_text: remainder.to_string(),
                    }
                    .into();
                }
                (Confidence::Low, _) => {
                    return Suggestion::Unclear {
                        input: book_input.to_string(),
                        candidates: found.suggestions.into_iter().cloned().collect(),
                        remainder_text: remainder.to_string(),
                    }
                    .into();
                }
                _ => {
                    return Suggestion::NotFound {
                        input: book_input.to_string(),
                        remainder_text: remainder.to_string(),
                    }
                    .into();
                }
            }
        }

        match parse_reference(reference_text, book) {
            Ok(chapters) => {
                tracing::debug!(
                    "Parsed '{trimmed}' as {} chapter(s) of {}",
                    chapters.len(),
                    book.map_or("<no book>", |b| b.name.as_str())
                );
                ParseResult::Success {
                    book: book.cloned(),
                    chapters,
                }
            }
            Err(rejection) => rejection.into(),
        }
    }
}

/// Parse a reading input against `catalog`.
///
/// Shorthand for [`ReadingParser::parse`].
pub fn parse_reading_input(input: &str, default_book: Option<&BookEntry>, catalog: &BookCatalog) -> ParseResult {
    ReadingParser::new(catalog).parse(input, default_book)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::Language;

    fn english() -> BookCatalog {
        BookCatalog::embedded(Language::En).unwrap()
    }

    #[test]
    fn test_book_prefix_split() {
        let caps = BOOK_PREFIX.captures("1 Tim 3:1,2; 4:15").unwrap();
        assert_eq!(&caps[1], "1 Tim");
        assert_eq!(&caps[2], "3:1,2; 4:15");

        let caps = BOOK_PREFIX.captures("Song of Solomon 2").unwrap();
        assert_eq!(&caps[1], "Song of Solomon");

        let caps = BOOK_PREFIX.captures("Isa. 3-4:15").unwrap();
        assert_eq!(&caps[1], "Isa.");

        assert!(BOOK_PREFIX.captures("3-4:15").is_none());
        assert!(BOOK_PREFIX.captures("Genesis").is_none());
    }

    #[test]
    fn test_book_with_chapter_range_and_verse() {
        let catalog = english();
        let result = parse_reading_input("Isa 3-4:15", None, &catalog);
        assert_eq!(result.book().unwrap().name, "Isaiah");
        assert_eq!(
            result.chapters(),
            &[ChapterReadEntry::complete(3), ChapterReadEntry::partial(4, 15, 16)]
        );
    }

    #[test]
    fn test_numbered_book_with_compound_reference() {
        let catalog = english();
        let result = parse_reading_input("1 Tim 3:1,2; 4:15", None, &catalog);
        assert_eq!(result.book().unwrap().number, 54);
        assert_eq!(
            result.chapters(),
            &[ChapterReadEntry::partial(3, 2, 3), ChapterReadEntry::partial(4, 15, 16)]
        );
    }

    #[test]
    fn test_default_book_applies_without_book_name() {
        let catalog = english();
        let isaiah = catalog.by_number(23).unwrap();
        let result = parse_reading_input("9-10", Some(isaiah), &catalog);
        assert_eq!(result.book(), Some(isaiah));
        assert_eq!(result.chapters().len(), 2);
    }

    #[test]
    fn test_named_book_overrides_default() {
        let catalog = english();
        let isaiah = catalog.by_number(23).unwrap();
        let result = parse_reading_input("Ruth 2", Some(isaiah), &catalog);
        assert_eq!(result.book().unwrap().name, "Ruth");
    }

    #[test]
    fn test_prefix_match_resolves() {
        let catalog = english();
        let result = parse_reading_input("Zephan 3", None, &catalog);
        assert_eq!(result.book().unwrap().name, "Zephaniah");
    }

    #[test]
    fn test_typo_suggests_did_you_mean() {
        let catalog = english();
        match parse_reading_input("Genisis 1:3", None, &catalog) {
            ParseResult::Suggestion(suggestion @ Suggestion::DidYouMean { .. }) => {
                assert_eq!(suggestion.candidate_labels()[0], "Genesis");
                let corrected = suggestion.accept(0).unwrap();
                assert_eq!(corrected, "Genesis 1:3");
                let result = parse_reading_input(&corrected, None, &catalog);
                assert_eq!(result.chapters(), &[ChapterReadEntry::partial(1, 3, 4)]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_distant_name_is_unclear() {
        let catalog = english();
        match parse_reading_input("Qqq 3", None, &catalog) {
            ParseResult::Suggestion(Suggestion::Unclear { input, candidates, remainder_text }) => {
                assert_eq!(input, "Qqq");
                assert_eq!(candidates.len(), 3);
                assert_eq!(remainder_text, "3");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let catalog = english();
        let result = parse_reading_input("Qqqqq 3:4", None, &catalog);
        assert_eq!(result.suggestion().map(Suggestion::kind), Some("not_found"));
        assert!(result.chapters().is_empty());
    }

    #[test]
    fn test_empty_input() {
        let catalog = english();
        assert_eq!(parse_reading_input("", None, &catalog).error(), Some(&ParseErrorKind::InvalidInput));
        assert_eq!(parse_reading_input(" \t ", None, &catalog).error(), Some(&ParseErrorKind::InvalidInput));
    }

    #[test]
    fn test_unrecognized_reference() {
        let catalog = english();
        let result = parse_reading_input("Genesis", None, &catalog);
        assert_eq!(result.error(), Some(&ParseErrorKind::FormatNotRecognized));
    }

    #[test]
    fn test_concatenated_digits_with_book() {
        let catalog = english();
        match parse_reading_input("John 316", None, &catalog) {
            ParseResult::Suggestion(suggestion @ Suggestion::InvalidChapter { .. }) => {
                assert_eq!(suggestion.candidate_labels(), vec!["3:16", "3-16"]);
                assert_eq!(suggestion.accept(0).as_deref(), Some("John 3:16"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_spaced_digits_collapse() {
        let catalog = english();
        // "3 16" collapses to "316" once whitespace is removed
        let result = parse_reading_input("John 3 16", None, &catalog);
        assert_eq!(result.suggestion().map(Suggestion::kind), Some("invalid_chapter"));
    }

    #[test]
    fn test_german_catalog() {
        let catalog = BookCatalog::embedded(Language::De).unwrap();
        let result = parse_reading_input("Röm 8:1-11", None, &catalog);
        assert_eq!(result.book().unwrap().name, "Römer");
        assert_eq!(result.chapters(), &[ChapterReadEntry::partial(8, 11, 12)]);

        let result = parse_reading_input("1 Mo 1-2", None, &catalog);
        assert_eq!(result.book().unwrap().number, 1);

        let result = parse_reading_input("Numeri 3", None, &catalog);
        assert_eq!(result.book().unwrap().number, 4);
    }

    #[test]
    fn test_book_token_falls_back_to_splittable_name() {
        let catalog = BookCatalog::embedded(Language::De).unwrap();
        assert_eq!(book_token(catalog.by_number(1).unwrap()), "1 Mose");
        assert_eq!(book_token(catalog.by_number(4).unwrap()), "Numeri");
        assert_eq!(book_token(catalog.by_number(5).unwrap()), "Deuteronomium");
        assert_eq!(book_token(english().by_number(22).unwrap()), "Song of Solomon");
    }

    #[test]
    fn test_accepting_chapter_reading_for_numbered_german_book() {
        let catalog = BookCatalog::embedded(Language::De).unwrap();
        let numbers = catalog.by_number(4).unwrap();
        assert_eq!(numbers.chapters, 36);

        let result = parse_reading_input("37", Some(numbers), &catalog);
        let suggestion = result.suggestion().unwrap();
        assert_eq!(suggestion.candidate_labels(), vec!["3:7", "3-7"]);

        let corrected = suggestion.accept(0).unwrap();
        assert_eq!(corrected, "Numeri 3:7");
        let result = parse_reading_input(&corrected, None, &catalog);
        assert_eq!(result.book(), Some(numbers));
        assert_eq!(result.chapters(), &[ChapterReadEntry::partial(3, 7, 8)]);
    }
}
