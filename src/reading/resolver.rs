//! Book name resolution.
//!
//! Turns what the user typed ("Isa", "1 tim", "Genisis") into a catalog
//! entry plus a confidence tier. Exact spellings win outright; otherwise
//! every book is scored by edit distance and prefix match and the best
//! candidate decides the tier.

use serde::Serialize;

use super::distance::distance;
use crate::bible::{BookCatalog, BookEntry};
use crate::constants::parser::{MAX_BOOK_SUGGESTIONS, MAX_CANDIDATE_DISTANCE, MAX_DID_YOU_MEAN_DISTANCE};

/// How certain a book match is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Name, abbreviation or alternative name matched exactly.
    Exact,
    /// Prefix match or zero distance; treated as resolved.
    High,
    /// Close enough to ask "did you mean?".
    Medium,
    /// Only loosely similar; the user has to pick.
    Low,
    /// Nothing resembles the input.
    #[serde(rename = "none")]
    NoMatch,
}

impl Confidence {
    /// Whether the match can be used without asking the user.
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Exact | Self::High)
    }
}

/// Result of resolving a book name against a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMatch<'a> {
    /// Best book, if the tier is good enough to name one.
    pub book: Option<&'a BookEntry>,
    /// Confidence tier.
    pub confidence: Confidence,
    /// Up to three candidates, best first (empty for exact matches).
    pub suggestions: Vec<&'a BookEntry>,
}

impl BookMatch<'_> {
    const fn no_match() -> Self {
        Self {
            book: None,
            confidence: Confidence::NoMatch,
            suggestions: Vec::new(),
        }
    }
}

#[derive(Debug)]
struct Candidate<'a> {
    book: &'a BookEntry,
    distance: usize,
    starts_with: bool,
}

/// Lowercase, trim and drop periods.
fn normalize(text: &str) -> String {
    text.to_lowercase().trim().replace('.', "")
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_exact(book: &BookEntry, cleaned: &str, cleaned_compact: &str) -> bool {
    let name = book.name.to_lowercase();
    name == cleaned
        || normalize(&book.abbreviation) == cleaned
        || book.alternative_names.iter().any(|alt| normalize(alt) == cleaned)
        || compact(&name) == cleaned_compact
}

/// Resolve `input` against `catalog`.
pub fn resolve_book<'a>(input: &str, catalog: &'a BookCatalog) -> BookMatch<'a> {
    let cleaned = normalize(input);
    if cleaned.is_empty() {
        return BookMatch::no_match();
    }

    let cleaned_compact = compact(&cleaned);
    if let Some(book) = catalog.iter().find(|b| is_exact(b, &cleaned, &cleaned_compact)) {
        tracing::debug!("Book '{input}' matched {} exactly", book.name);
        return BookMatch {
            book: Some(book),
            confidence: Confidence::Exact,
            suggestions: Vec::new(),
        };
    }

    let mut candidates: Vec<Candidate<'a>> = catalog
        .iter()
        .filter_map(|book| {
            let name = book.name.to_lowercase();
            let abbreviation = normalize(&book.abbreviation);
            let distance = distance(&cleaned, &name).min(distance(&cleaned, &abbreviation));
            let starts_with = name.starts_with(&cleaned) || abbreviation.starts_with(&cleaned);
            (starts_with || distance <= MAX_CANDIDATE_DISTANCE).then_some(Candidate {
                book,
                distance,
                starts_with,
            })
        })
        .collect();

    // Stable: ties keep catalog order
    candidates.sort_by(|a, b| {
        b.starts_with
            .cmp(&a.starts_with)
            .then(a.distance.cmp(&b.distance))
    });

    let Some(best) = candidates.first() else {
        tracing::debug!("No book resembles '{input}'");
        return BookMatch::no_match();
    };

    let (book, confidence) = if best.distance == 0 || best.starts_with {
        (Some(best.book), Confidence::High)
    } else if best.distance <= MAX_DID_YOU_MEAN_DISTANCE {
        (Some(best.book), Confidence::Medium)
    } else {
        (None, Confidence::Low)
    };

    tracing::debug!(
        "Book '{input}' → {} ({confidence:?}, distance {}, {} candidates)",
        best.book.name,
        best.distance,
        candidates.len()
    );

    BookMatch {
        book,
        confidence,
        suggestions: candidates.iter().take(MAX_BOOK_SUGGESTIONS).map(|c| c.book).collect(),
    }
}
