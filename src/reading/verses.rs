//! Verse-list reduction.

use super::types::ParseErrorKind;

/// Parse a run of ASCII digits.
///
/// Anything that is not a plain number is an unrecognized format; a number
/// that does not fit is a parsing error.
pub(crate) fn parse_number(text: &str) -> Result<u16, ParseErrorKind> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseErrorKind::FormatNotRecognized);
    }
    text.parse().map_err(|_| ParseErrorKind::ParsingError)
}

/// Highest verse named in a list such as `"15"`, `"1,2"`, `"1-5"` or `"1,2,5-7"`.
///
/// Only the watermark survives; which verses were skipped is not recorded.
/// A range counts up to its second bound; anything after a further `-`
/// (`"1-2-3"`) is ignored.
pub fn max_verse(list: &str) -> Result<u16, ParseErrorKind> {
    list.split(',').try_fold(0, |max, part| {
        let mut bounds = part.split('-');
        let start = bounds.next().unwrap_or_default();
        let verse = match bounds.next() {
            Some(end) => {
                parse_number(start)?;
                parse_number(end)?
            }
            None => parse_number(start)?,
        };
        Ok(max.max(verse))
    })
}
