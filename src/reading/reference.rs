//! Reference tokenizing and chapter-range expansion.
//!
//! The reference text (book name already removed) is split on `;` and each
//! piece is matched against five shapes, in this order:
//!
//! | Shape              | Example    |
//! |--------------------|------------|
//! | `C:V-C:V`          | `2:1-4:2`  |
//! | `C-C:verses`       | `3-4:15`   |
//! | `C:verses`         | `3:1,2`    |
//! | `C-C`              | `3-5`      |
//! | `C`                | `3`        |
//!
//! The first shape that matches wins, so `3-4:1-5` is a chapter range with
//! a verse list and never a single chapter with verses.

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use lazy_static::lazy_static;
use regex::Regex;

use super::types::{ChapterReadEntry, ChapterSuggestion, ParseErrorKind, ParseResult, Suggestion};
use super::verses::{max_verse, parse_number};
use crate::bible::BookEntry;

lazy_static! {
    static ref VERSE_TO_VERSE: Regex = Regex::new(r"^([0-9]+):([0-9]+)-([0-9]+):([0-9]+)$").unwrap();
    static ref RANGE_WITH_VERSES: Regex = Regex::new(r"^([0-9]+)-([0-9]+):(.+)$").unwrap();
    static ref CHAPTER_WITH_VERSES: Regex = Regex::new(r"^([0-9]+):(.+)$").unwrap();
    static ref CHAPTER_RANGE: Regex = Regex::new(r"^([0-9]+)-([0-9]+)$").unwrap();
    static ref SINGLE_CHAPTER: Regex = Regex::new(r"^([0-9]+)$").unwrap();
}

/// Why a reference produced no chapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Hard failure.
    Error(ParseErrorKind),
    /// The user has to pick a reinterpretation.
    Suggestion(Suggestion),
}

impl From<ParseErrorKind> for Rejection {
    fn from(kind: ParseErrorKind) -> Self {
        Self::Error(kind)
    }
}

impl From<Rejection> for ParseResult {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Error(kind) => Self::Error(kind),
            Rejection::Suggestion(suggestion) => Self::Suggestion(suggestion),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape<'a> {
    VerseToVerse {
        start_chapter: &'a str,
        start_verse: &'a str,
        end_chapter: &'a str,
        end_verse: &'a str,
    },
    RangeWithVerses {
        start: &'a str,
        end: &'a str,
        verses: &'a str,
    },
    ChapterWithVerses {
        chapter: &'a str,
        verses: &'a str,
    },
    ChapterRange {
        start: &'a str,
        end: &'a str,
    },
    SingleChapter(&'a str),
}

type ShapeMatcher = for<'a> fn(&'a str) -> Option<Shape<'a>>;

/// Shape matchers in priority order
const SHAPES: [ShapeMatcher; 5] = [
    verse_to_verse,
    range_with_verses,
    chapter_with_verses,
    chapter_range,
    single_chapter,
];

fn verse_to_verse(text: &str) -> Option<Shape<'_>> {
    let caps = VERSE_TO_VERSE.captures(text)?;
    Some(Shape::VerseToVerse {
        start_chapter: caps.get(1)?.as_str(),
        start_verse: caps.get(2)?.as_str(),
        end_chapter: caps.get(3)?.as_str(),
        end_verse: caps.get(4)?.as_str(),
    })
}

fn range_with_verses(text: &str) -> Option<Shape<'_>> {
    let caps = RANGE_WITH_VERSES.captures(text)?;
    Some(Shape::RangeWithVerses {
        start: caps.get(1)?.as_str(),
        end: caps.get(2)?.as_str(),
        verses: caps.get(3)?.as_str(),
    })
}

fn chapter_with_verses(text: &str) -> Option<Shape<'_>> {
    let caps = CHAPTER_WITH_VERSES.captures(text)?;
    Some(Shape::ChapterWithVerses {
        chapter: caps.get(1)?.as_str(),
        verses: caps.get(2)?.as_str(),
    })
}

fn chapter_range(text: &str) -> Option<Shape<'_>> {
    let caps = CHAPTER_RANGE.captures(text)?;
    Some(Shape::ChapterRange {
        start: caps.get(1)?.as_str(),
        end: caps.get(2)?.as_str(),
    })
}

fn single_chapter(text: &str) -> Option<Shape<'_>> {
    let caps = SINGLE_CHAPTER.captures(text)?;
    Some(Shape::SingleChapter(caps.get(1)?.as_str()))
}

fn classify(piece: &str) -> Option<Shape<'_>> {
    SHAPES.iter().find_map(|matcher| matcher(piece))
}

/// Chapter numbers start at 1.
fn chapter_number(text: &str) -> Result<u16, ParseErrorKind> {
    match parse_number(text)? {
        0 => Err(ParseErrorKind::FormatNotRecognized),
        n => Ok(n),
    }
}

fn next_verse(verse: u16) -> Result<u16, ParseErrorKind> {
    verse.checked_add(1).ok_or(ParseErrorKind::ParsingError)
}

/// Parse reference text such as `"3-4:15"` or `"3:1,2; 4:15"`.
///
/// Whitespace is ignored. With a `book`, a lone chapter number beyond the
/// book's chapter count is rejected with an `invalid_chapter` suggestion or
/// a [`ParseErrorKind::ChapterExceeds`] error. The first rejection in any
/// `;`-separated piece rejects the whole reference; a later piece naming a
/// chapter again replaces the earlier entry in its original position.
pub fn parse_reference(text: &str, book: Option<&BookEntry>) -> Result<Vec<ChapterReadEntry>, Rejection> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    cleaned.split(';').try_fold(Vec::<ChapterReadEntry>::new(), |mut chapters, piece| {
        for entry in parse_piece(piece, book)? {
            match chapters.iter_mut().find(|e| e.chapter == entry.chapter) {
                Some(existing) => *existing = entry,
                None => chapters.push(entry),
            }
        }
        Ok(chapters)
    })
}

fn parse_piece(piece: &str, book: Option<&BookEntry>) -> Result<Vec<ChapterReadEntry>, Rejection> {
    let Some(shape) = classify(piece) else {
        tracing::debug!("Reference piece '{piece}' matches no known shape");
        return Err(ParseErrorKind::FormatNotRecognized.into());
    };

    let chapters = match shape {
        Shape::VerseToVerse {
            start_chapter,
            start_verse,
            end_chapter,
            end_verse,
        } => {
            let start_chapter = chapter_number(start_chapter)?;
            let start_verse = parse_number(start_verse)?;
            let end_chapter = chapter_number(end_chapter)?;
            let end_verse = parse_number(end_verse)?;

            if start_chapter > end_chapter {
                return Err(ParseErrorKind::InvalidRangeChapters.into());
            }

            let mut chapters = Vec::with_capacity(usize::from(end_chapter - start_chapter) + 1);
            chapters.push(if start_verse == 1 {
                ChapterReadEntry::complete(start_chapter)
            } else {
                ChapterReadEntry::to_end_from(start_chapter, start_verse)
            });
            chapters.extend((start_chapter..end_chapter).skip(1).map(ChapterReadEntry::complete));
            if end_chapter > start_chapter {
                chapters.push(ChapterReadEntry::partial(end_chapter, end_verse, next_verse(end_verse)?));
            }
            chapters
        }
        Shape::RangeWithVerses { start, end, verses } => {
            let start = chapter_number(start)?;
            let end = chapter_number(end)?;
            let last_verse = max_verse(verses)?;

            let mut chapters: Vec<_> = (start..end).map(ChapterReadEntry::complete).collect();
            chapters.push(ChapterReadEntry::partial(end, last_verse, next_verse(last_verse)?));
            chapters
        }
        Shape::ChapterWithVerses { chapter, verses } => {
            let chapter = chapter_number(chapter)?;
            let last_verse = max_verse(verses)?;
            vec![ChapterReadEntry::partial(chapter, last_verse, next_verse(last_verse)?)]
        }
        Shape::ChapterRange { start, end } => {
            let start = chapter_number(start)?;
            let end = chapter_number(end)?;
            if start > end {
                return Err(ParseErrorKind::InvalidRange.into());
            }
            (start..=end).map(ChapterReadEntry::complete).collect()
        }
        Shape::SingleChapter(digits) => single_chapter_entries(digits, book)?,
    };

    Ok(chapters)
}

fn single_chapter_entries(digits: &str, book: Option<&BookEntry>) -> Result<Vec<ChapterReadEntry>, Rejection> {
    // Too large for u16 certainly exceeds any book
    let chapter = digits.parse::<u16>().ok();

    if let Some(book) = book {
        if chapter.map_or(true, |c| c > book.chapters) {
            return Err(reinterpret(digits, book));
        }
    }

    match chapter {
        Some(0) => Err(ParseErrorKind::FormatNotRecognized.into()),
        Some(c) => Ok(vec![ChapterReadEntry::complete(c)]),
        None => Err(ParseErrorKind::ParsingError.into()),
    }
}

/// Offer `chapter:verse` and `start-end` readings of digits that overshoot
/// the book ("67" in a 66-chapter book could be "6:7" or "6-7").
fn reinterpret(digits: &str, book: &BookEntry) -> Rejection {
    let max = book.chapters;
    let splits: Vec<(u16, u16)> = (1..digits.len())
        .filter_map(|i| {
            let (head, tail) = digits.split_at(i);
            Some((head.parse().ok()?, tail.parse().ok()?))
        })
        .collect();

    let verses = splits
        .iter()
        .filter(|&&(chapter, verse)| (1..=max).contains(&chapter) && verse > 0)
        .map(|&(chapter, verse)| ChapterSuggestion::Verse { chapter, verse });
    let ranges = splits
        .iter()
        .filter(|&&(start, end)| start >= 1 && start < end && end <= max)
        .map(|&(start, end)| ChapterSuggestion::Range { start, end });
    let candidates: Vec<_> = verses.chain(ranges).collect();

    if candidates.is_empty() {
        tracing::debug!("Chapter {digits} exceeds {} ({} chapters)", book.name, max);
        return Rejection::Error(ParseErrorKind::ChapterExceeds {
            book: book.name.clone(),
            chapters: max,
            input: digits.to_string(),
        });
    }

    tracing::debug!("Chapter {digits} exceeds {}, offering {} readings", book.name, candidates.len());
    Rejection::Suggestion(Suggestion::InvalidChapter {
        book: book.clone(),
        input: digits.to_string(),
        candidates,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn isaiah() -> BookEntry {
        BookEntry::new(23, "Isaiah", "Isa.", 66)
    }

    fn parse(text: &str) -> Vec<ChapterReadEntry> {
        parse_reference(text, None).unwrap()
    }

    fn error(text: &str, book: Option<&BookEntry>) -> ParseErrorKind {
        match parse_reference(text, book) {
            Err(Rejection::Error(kind)) => kind,
            other => panic!("expected error for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_shape_priority() {
        assert!(matches!(classify("2:1-4:2"), Some(Shape::VerseToVerse { .. })));
        assert!(matches!(classify("3-4:15"), Some(Shape::RangeWithVerses { .. })));
        assert!(matches!(
            classify("3-4:1-5"),
            Some(Shape::RangeWithVerses { start: "3", end: "4", verses: "1-5" })
        ));
        assert!(matches!(classify("3:1-5"), Some(Shape::ChapterWithVerses { .. })));
        assert!(matches!(classify("3-5"), Some(Shape::ChapterRange { .. })));
        assert!(matches!(classify("3"), Some(Shape::SingleChapter("3"))));
        assert!(classify("three").is_none());
        assert!(classify("").is_none());
    }

    #[test]
    fn test_verse_to_verse_starting_mid_chapter() {
        assert_eq!(
            parse("2:5-4:2"),
            vec![
                ChapterReadEntry::to_end_from(2, 5),
                ChapterReadEntry::complete(3),
                ChapterReadEntry::partial(4, 2, 3),
            ]
        );
    }

    #[test]
    fn test_verse_to_verse_within_one_chapter() {
        // Only the start chapter is recorded when both ends share a chapter
        assert_eq!(parse("3:5-3:9"), vec![ChapterReadEntry::to_end_from(3, 5)]);
        assert_eq!(parse("3:1-3:9"), vec![ChapterReadEntry::complete(3)]);
    }

    #[test]
    fn test_verse_to_verse_backwards() {
        assert_eq!(error("4:1-2:3", None), ParseErrorKind::InvalidRangeChapters);
    }

    #[test]
    fn test_range_with_verse_list() {
        assert_eq!(
            parse("3-5:1,2,5-7"),
            vec![
                ChapterReadEntry::complete(3),
                ChapterReadEntry::complete(4),
                ChapterReadEntry::partial(5, 7, 8),
            ]
        );
    }

    #[test]
    fn test_chapter_with_verse_range() {
        assert_eq!(parse("3:1-5"), vec![ChapterReadEntry::partial(3, 5, 6)]);
    }

    #[test]
    fn test_backwards_chapter_range() {
        assert_eq!(error("5-3", None), ParseErrorKind::InvalidRange);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(parse(" 3 - 4 : 15 "), parse("3-4:15"));
    }

    #[test]
    fn test_chapter_zero_not_recognized() {
        assert_eq!(error("0", None), ParseErrorKind::FormatNotRecognized);
        assert_eq!(error("0-3", None), ParseErrorKind::FormatNotRecognized);
    }

    #[test]
    fn test_oversized_numbers_are_parsing_errors() {
        assert_eq!(error("99999999", None), ParseErrorKind::ParsingError);
        assert_eq!(error("3:65535", None), ParseErrorKind::ParsingError);
    }

    #[test]
    fn test_chapter_within_book_is_complete() {
        let book = isaiah();
        assert_eq!(parse_reference("66", Some(&book)).unwrap(), vec![ChapterReadEntry::complete(66)]);
    }

    #[test]
    fn test_overshooting_chapter_offers_readings() {
        let book = isaiah();
        match parse_reference("67", Some(&book)) {
            Err(Rejection::Suggestion(Suggestion::InvalidChapter { input, candidates, .. })) => {
                assert_eq!(input, "67");
                assert_eq!(
                    candidates,
                    vec![
                        ChapterSuggestion::Verse { chapter: 6, verse: 7 },
                        ChapterSuggestion::Range { start: 6, end: 7 },
                    ]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_overshooting_three_digits() {
        let book = isaiah();
        match parse_reference("316", Some(&book)) {
            Err(Rejection::Suggestion(Suggestion::InvalidChapter { candidates, .. })) => {
                let labels: Vec<String> = candidates.iter().map(ToString::to_string).collect();
                assert_eq!(labels, vec!["3:16", "31:6", "3-16"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_overshooting_without_reading_is_chapter_exceeds() {
        let jude = BookEntry::new(65, "Jude", "Jude", 1);
        assert_eq!(
            error("2", Some(&jude)),
            ParseErrorKind::ChapterExceeds {
                book: "Jude".to_string(),
                chapters: 1,
                input: "2".to_string(),
            }
        );
        // "10" splits into chapter 1 verse 0, which is no verse
        assert!(matches!(error("10", Some(&jude)), ParseErrorKind::ChapterExceeds { .. }));
    }

    #[test]
    fn test_huge_chapter_with_book_is_reinterpreted() {
        let book = isaiah();
        assert!(matches!(
            parse_reference("123456", Some(&book)),
            Err(Rejection::Suggestion(Suggestion::InvalidChapter { .. }))
        ));
    }

    #[test]
    fn test_compound_reference_keeps_order() {
        assert_eq!(
            parse("5;3-4"),
            vec![
                ChapterReadEntry::complete(5),
                ChapterReadEntry::complete(3),
                ChapterReadEntry::complete(4),
            ]
        );
    }

    #[test]
    fn test_compound_reference_repeats_replace_earlier_entries() {
        assert_eq!(
            parse("3:1-5;4;3:10"),
            vec![ChapterReadEntry::partial(3, 10, 11), ChapterReadEntry::complete(4)]
        );
        assert_eq!(
            parse("3:5;4;3:10"),
            vec![ChapterReadEntry::partial(3, 10, 11), ChapterReadEntry::complete(4)]
        );
        assert_eq!(
            parse("2-4;3:6"),
            vec![
                ChapterReadEntry::complete(2),
                ChapterReadEntry::partial(3, 6, 7),
                ChapterReadEntry::complete(4)
            ]
        );
    }

    #[test]
    fn test_compound_reference_aborts_on_first_error() {
        assert_eq!(error("3;5-1;4", None), ParseErrorKind::InvalidRange);
        assert_eq!(error("3;", None), ParseErrorKind::FormatNotRecognized);
    }

    #[test]
    fn test_compound_reference_aborts_on_suggestion() {
        let book = isaiah();
        assert!(matches!(
            parse_reference("3;67", Some(&book)),
            Err(Rejection::Suggestion(_))
        ));
    }
}
