//! Helpers for applying parsed chapters to stored reading progress.

use super::types::{ChapterReadEntry, ReadStatus};

/// Merge `incoming` entries into `existing`, keyed by chapter.
///
/// An incoming entry drops any existing entry for the same chapter and is
/// appended at the end, so the most recent reading of a chapter is last.
pub fn merge_chapter_entries(existing: &[ChapterReadEntry], incoming: &[ChapterReadEntry]) -> Vec<ChapterReadEntry> {
    let mut merged = existing.to_vec();
    for entry in incoming {
        merged.retain(|e| e.chapter != entry.chapter);
        merged.push(*entry);
    }
    merged
}

/// Short status line for a chapter ("Completely read", "Up to verse 15").
pub fn format_chapter_status(entry: Option<&ChapterReadEntry>) -> String {
    match entry {
        None => "Not read".to_string(),
        Some(e) if e.reads_to_end() => match e.continue_from {
            Some(from) => format!("From verse {from} to the end"),
            None => "To the end of the chapter".to_string(),
        },
        Some(e) => match (e.status, e.verses) {
            (ReadStatus::Complete, _) => "Completely read".to_string(),
            (ReadStatus::Partial, Some(verse)) => format!("Up to verse {verse}"),
            (ReadStatus::Partial, None) => "Partially read".to_string(),
        },
    }
}

/// Where to pick up reading, for partially read chapters.
pub fn next_reading(entry: Option<&ChapterReadEntry>) -> Option<String> {
    let entry = entry?;
    if entry.status != ReadStatus::Partial {
        return None;
    }
    entry.continue_from.map(|verse| format!("Continue from verse {verse}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_replaces_and_moves_to_end() {
        let existing = vec![
            ChapterReadEntry::complete(1),
            ChapterReadEntry::partial(2, 5, 6),
            ChapterReadEntry::complete(3),
        ];
        let incoming = vec![ChapterReadEntry::complete(2), ChapterReadEntry::complete(4)];

        let merged = merge_chapter_entries(&existing, &incoming);
        let chapters: Vec<u16> = merged.iter().map(|e| e.chapter).collect();
        assert_eq!(chapters, vec![1, 3, 2, 4]);
        assert!(merged[2].is_complete());
        // Inputs are untouched
        assert_eq!(existing.len(), 3);
    }

    #[test]
    fn test_merge_into_empty() {
        let incoming = vec![ChapterReadEntry::complete(7)];
        assert_eq!(merge_chapter_entries(&[], &incoming), incoming);
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(format_chapter_status(None), "Not read");
        assert_eq!(format_chapter_status(Some(&ChapterReadEntry::complete(3))), "Completely read");
        assert_eq!(format_chapter_status(Some(&ChapterReadEntry::partial(3, 15, 16))), "Up to verse 15");
        assert_eq!(
            format_chapter_status(Some(&ChapterReadEntry::to_end_from(3, 5))),
            "From verse 5 to the end"
        );
    }

    #[test]
    fn test_next_reading() {
        assert_eq!(next_reading(None), None);
        assert_eq!(next_reading(Some(&ChapterReadEntry::complete(3))), None);
        assert_eq!(
            next_reading(Some(&ChapterReadEntry::partial(4, 15, 16))).as_deref(),
            Some("Continue from verse 16")
        );
    }
}
