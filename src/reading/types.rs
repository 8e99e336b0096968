//! Result types produced by the reading parser.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bible::BookEntry;
use crate::constants::parser::TO_END_OF_CHAPTER;

/// How much of a chapter was read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    /// The whole chapter.
    Complete,
    /// Up to a watermark verse.
    Partial,
}

/// Read status of a single chapter.
///
/// Serializes with the field names used by stored progress data
/// (`chapter`, `status`, `verses`, `continueFrom`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterReadEntry {
    /// Chapter number, starting at 1.
    pub chapter: u16,
    /// Complete or partial.
    pub status: ReadStatus,
    /// Highest verse read, or [`TO_END_OF_CHAPTER`]; `None` when complete.
    pub verses: Option<u16>,
    /// Verse the next reading resumes at; only set on partial entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_from: Option<u16>,
}

impl ChapterReadEntry {
    /// A fully read chapter.
    pub const fn complete(chapter: u16) -> Self {
        Self {
            chapter,
            status: ReadStatus::Complete,
            verses: None,
            continue_from: None,
        }
    }

    /// A chapter read up to `verses`, resuming at `continue_from`.
    pub const fn partial(chapter: u16, verses: u16, continue_from: u16) -> Self {
        Self {
            chapter,
            status: ReadStatus::Partial,
            verses: Some(verses),
            continue_from: Some(continue_from),
        }
    }

    /// A chapter read from `verse` through its (unknown) last verse.
    pub const fn to_end_from(chapter: u16, verse: u16) -> Self {
        Self::partial(chapter, TO_END_OF_CHAPTER, verse)
    }

    /// Whether the whole chapter was read.
    pub fn is_complete(&self) -> bool {
        self.status == ReadStatus::Complete
    }

    /// Whether the entry uses the "to end of chapter" sentinel.
    pub fn reads_to_end(&self) -> bool {
        self.status == ReadStatus::Partial && self.verses == Some(TO_END_OF_CHAPTER)
    }
}

/// A reinterpretation of a chapter number that exceeds the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChapterSuggestion {
    /// Read the digits as `chapter:verse` ("67" → "6:7").
    Verse {
        /// Chapter part.
        chapter: u16,
        /// Verse part.
        verse: u16,
    },
    /// Read the digits as a chapter range ("67" → "6-7").
    Range {
        /// First chapter.
        start: u16,
        /// Last chapter.
        end: u16,
    },
}

impl ChapterSuggestion {
    /// Human-readable explanation, e.g. "Chapter 6, verse 7".
    pub fn description(&self) -> String {
        match self {
            Self::Verse { chapter, verse } => format!("Chapter {chapter}, verse {verse}"),
            Self::Range { start, end } => format!("Chapters {start} to {end}"),
        }
    }
}

impl fmt::Display for ChapterSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verse { chapter, verse } => write!(f, "{chapter}:{verse}"),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

/// Recoverable ambiguity the user can resolve by picking a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Suggestion {
    /// The book name is close to one or more books.
    DidYouMean {
        /// Book text as typed.
        input: String,
        /// Up to three candidate books, best first.
        candidates: Vec<BookEntry>,
        /// Reference text following the book name.
        remainder_text: String,
    },
    /// The book name is only loosely similar to some books.
    Unclear {
        /// Book text as typed.
        input: String,
        /// Up to three candidate books, best first.
        candidates: Vec<BookEntry>,
        /// Reference text following the book name.
        remainder_text: String,
    },
    /// No book resembles the input.
    NotFound {
        /// Book text as typed.
        input: String,
        /// Reference text following the book name.
        remainder_text: String,
    },
    /// A single chapter number exceeds the book's chapter count.
    InvalidChapter {
        /// Book the chapter was checked against.
        book: BookEntry,
        /// Digits as typed.
        input: String,
        /// Possible readings of the digits.
        candidates: Vec<ChapterSuggestion>,
    },
}

impl Suggestion {
    /// Stable tag: `did_you_mean`, `unclear`, `not_found` or `invalid_chapter`.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DidYouMean { .. } => "did_you_mean",
            Self::Unclear { .. } => "unclear",
            Self::NotFound { .. } => "not_found",
            Self::InvalidChapter { .. } => "invalid_chapter",
        }
    }

    /// Number of selectable candidates.
    pub fn candidate_count(&self) -> usize {
        match self {
            Self::DidYouMean { candidates, .. } | Self::Unclear { candidates, .. } => candidates.len(),
            Self::NotFound { .. } => 0,
            Self::InvalidChapter { candidates, .. } => candidates.len(),
        }
    }

    /// Labels of the selectable candidates in order.
    pub fn candidate_labels(&self) -> Vec<String> {
        match self {
            Self::DidYouMean { candidates, .. } | Self::Unclear { candidates, .. } => {
                candidates.iter().map(|b| b.name.clone()).collect()
            }
            Self::NotFound { .. } => Vec::new(),
            Self::InvalidChapter { candidates, .. } => candidates.iter().map(ToString::to_string).collect(),
        }
    }

    /// Rebuild the input text with candidate `index` chosen.
    ///
    /// Returns `None` for an out-of-range index or a `not_found` suggestion.
    pub fn accept(&self, index: usize) -> Option<String> {
        match self {
            Self::DidYouMean { candidates, remainder_text, .. }
            | Self::Unclear { candidates, remainder_text, .. } => {
                candidates.get(index).map(|book| format!("{} {remainder_text}", super::book_token(book)))
            }
            Self::NotFound { .. } => None,
            Self::InvalidChapter { book, candidates, .. } => {
                candidates.get(index).map(|c| format!("{} {c}", super::book_token(book)))
            }
        }
    }
}

/// Why a reading could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// Empty or whitespace-only input.
    #[error("Please enter a reading")]
    InvalidInput,
    /// The reference matches none of the known shapes.
    #[error("Format not recognized. Try \"3\", \"3-5\", \"3:1-5\" or \"Isa 3-4:15\"")]
    FormatNotRecognized,
    /// Unexpected failure, such as a number too large to represent.
    #[error("The reading could not be parsed")]
    ParsingError,
    /// A chapter range whose start is after its end.
    #[error("Invalid range: the first chapter is after the last one")]
    InvalidRange,
    /// A `chapter:verse-chapter:verse` range whose start chapter is after its end chapter.
    #[error("Invalid range: the start chapter is after the end chapter")]
    InvalidRangeChapters,
    /// A chapter number beyond the book with no sensible reinterpretation.
    #[error("{book} only has {chapters} chapters (got {input})")]
    ChapterExceeds {
        /// Book name.
        book: String,
        /// Chapters in the book.
        chapters: u16,
        /// Chapter digits as typed.
        input: String,
    },
}

impl ParseErrorKind {
    /// Translation key used by the UI layer.
    pub const fn i18n_key(&self) -> &'static str {
        match self {
            Self::InvalidInput => "weekly.error_invalid_input",
            Self::FormatNotRecognized => "weekly.error_format_not_recognized",
            Self::ParsingError => "weekly.error_parsing",
            Self::InvalidRange => "weekly.error_invalid_range",
            Self::InvalidRangeChapters => "weekly.error_invalid_range_chapters",
            Self::ChapterExceeds { .. } => "weekly.error_chapter_exceeds",
        }
    }
}

/// Outcome of parsing one reading input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ParseResult {
    /// The reading was understood.
    Success {
        /// Resolved book, or `None` when the input named no book and no default was given.
        book: Option<BookEntry>,
        /// Chapters read, in input order.
        chapters: Vec<ChapterReadEntry>,
    },
    /// The user has to choose between candidates.
    Suggestion(Suggestion),
    /// The input could not be parsed.
    Error(ParseErrorKind),
}

impl ParseResult {
    /// Chapters of a successful parse; empty otherwise.
    pub fn chapters(&self) -> &[ChapterReadEntry] {
        match self {
            Self::Success { chapters, .. } => chapters,
            Self::Suggestion(_) | Self::Error(_) => &[],
        }
    }

    /// Resolved book of a successful parse.
    pub const fn book(&self) -> Option<&BookEntry> {
        match self {
            Self::Success { book, .. } => book.as_ref(),
            Self::Suggestion(_) | Self::Error(_) => None,
        }
    }

    /// The suggestion, if this outcome is one.
    pub const fn suggestion(&self) -> Option<&Suggestion> {
        match self {
            Self::Suggestion(s) => Some(s),
            _ => None,
        }
    }

    /// The error kind, if this outcome is one.
    pub const fn error(&self) -> Option<&ParseErrorKind> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the parse succeeded.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<ParseErrorKind> for ParseResult {
    fn from(kind: ParseErrorKind) -> Self {
        Self::Error(kind)
    }
}

impl From<Suggestion> for ParseResult {
    fn from(suggestion: Suggestion) -> Self {
        Self::Suggestion(suggestion)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn genesis() -> BookEntry {
        BookEntry::new(1, "Genesis", "Ge.", 50)
    }

    #[test]
    fn test_entry_serializes_with_stored_field_names() {
        let json = serde_json::to_value(ChapterReadEntry::partial(4, 15, 16)).unwrap();
        assert_eq!(json, serde_json::json!({
            "chapter": 4, "status": "partial", "verses": 15, "continueFrom": 16
        }));

        let json = serde_json::to_value(ChapterReadEntry::complete(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "chapter": 3, "status": "complete", "verses": null }));
    }

    #[test]
    fn test_stored_entry_deserializes() {
        let entry: ChapterReadEntry =
            serde_json::from_str(r#"{"chapter":2,"status":"partial","verses":999,"continueFrom":5}"#).unwrap();
        assert!(entry.reads_to_end());
        assert!(!entry.is_complete());
    }

    #[test]
    fn test_chapter_suggestion_display() {
        let verse = ChapterSuggestion::Verse { chapter: 6, verse: 7 };
        let range = ChapterSuggestion::Range { start: 6, end: 7 };
        assert_eq!(verse.to_string(), "6:7");
        assert_eq!(range.to_string(), "6-7");
        assert_eq!(verse.description(), "Chapter 6, verse 7");
        assert_eq!(range.description(), "Chapters 6 to 7");
    }

    #[test]
    fn test_accept_book_suggestion_rebuilds_input() {
        let suggestion = Suggestion::DidYouMean {
            input: "Genisis".to_string(),
            candidates: vec![genesis()],
            remainder_text: "1:3".to_string(),
        };
        assert_eq!(suggestion.accept(0).as_deref(), Some("Genesis 1:3"));
        assert_eq!(suggestion.accept(1), None);
        assert_eq!(suggestion.kind(), "did_you_mean");
        assert_eq!(suggestion.candidate_labels(), vec!["Genesis".to_string()]);
    }

    #[test]
    fn test_accept_chapter_suggestion_rebuilds_input() {
        let suggestion = Suggestion::InvalidChapter {
            book: genesis(),
            input: "67".to_string(),
            candidates: vec![
                ChapterSuggestion::Verse { chapter: 6, verse: 7 },
                ChapterSuggestion::Range { start: 6, end: 7 },
            ],
        };
        assert_eq!(suggestion.accept(1).as_deref(), Some("Genesis 6-7"));
        assert_eq!(suggestion.candidate_count(), 2);
    }

    #[test]
    fn test_not_found_has_nothing_to_accept() {
        let suggestion = Suggestion::NotFound {
            input: "Qqqqq".to_string(),
            remainder_text: "3".to_string(),
        };
        assert_eq!(suggestion.accept(0), None);
        assert_eq!(suggestion.candidate_count(), 0);
    }

    #[test]
    fn test_suggestion_json_shape() {
        let suggestion = Suggestion::NotFound {
            input: "Xy".to_string(),
            remainder_text: "3".to_string(),
        };
        let json = serde_json::to_value(ParseResult::Suggestion(suggestion)).unwrap();
        assert_eq!(json["outcome"], "suggestion");
        assert_eq!(json["type"], "not_found");
        assert_eq!(json["remainderText"], "3");
    }

    #[test]
    fn test_error_keys_and_messages() {
        let err = ParseErrorKind::ChapterExceeds {
            book: "Jude".to_string(),
            chapters: 1,
            input: "2".to_string(),
        };
        assert_eq!(err.i18n_key(), "weekly.error_chapter_exceeds");
        assert_eq!(err.to_string(), "Jude only has 1 chapters (got 2)");

        let json = serde_json::to_value(ParseResult::from(ParseErrorKind::InvalidRange)).unwrap();
        assert_eq!(json["outcome"], "error");
        assert_eq!(json["kind"], "invalid_range");
    }

    #[test]
    fn test_non_success_has_no_chapters() {
        let result = ParseResult::from(ParseErrorKind::InvalidInput);
        assert!(result.chapters().is_empty());
        assert!(result.book().is_none());
        assert!(!result.is_success());
        assert_eq!(result.error(), Some(&ParseErrorKind::InvalidInput));
    }
}
