//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Reading-reference parser constants.
pub mod parser {
    /// Verse sentinel meaning "read from `continue_from` to the end of the chapter".
    pub const TO_END_OF_CHAPTER: u16 = 999;

    /// Largest edit distance at which a book is still offered as a candidate.
    pub const MAX_CANDIDATE_DISTANCE: usize = 3;

    /// Largest edit distance that still counts as a "did you mean" match.
    pub const MAX_DID_YOU_MEAN_DISTANCE: usize = 2;

    /// Maximum number of book suggestions returned by the resolver.
    pub const MAX_BOOK_SUGGESTIONS: usize = 3;
}

/// Book catalog constants.
pub mod catalog {
    /// Number of books in a complete catalog.
    pub const BOOK_COUNT: u8 = 66;

    /// Language code used when none is configured or the configured one is unknown.
    pub const DEFAULT_LANGUAGE: &str = "de";

    /// File name pattern for on-disk catalog overrides (`{code}` is replaced).
    pub const FILE_NAME_PATTERN: &str = "bible-books-{code}.json";
}

/// Test bench constants.
pub mod bench {
    /// Number of past parses kept in the history panel.
    pub const DEFAULT_HISTORY_LIMIT: usize = 10;

    /// Event poll interval in milliseconds.
    pub const POLL_INTERVAL_MS: u64 = 50;

    /// Log file name inside the application data directory.
    pub const LOG_FILE: &str = "reading-companion.log";
}

/// UI layout constants.
pub mod ui {
    /// Height of the input box including borders.
    pub const INPUT_HEIGHT: u16 = 3;

    /// Percentage of the body width given to the result panel.
    pub const RESULT_SPLIT_PERCENT: u16 = 60;
}
