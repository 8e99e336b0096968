//! Test bench state and key handling.

use arboard::Clipboard;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::bible::{BookEntry, CatalogProvider, Language, LanguageCatalogs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::reading::{parse_reading_input, resolve_book, ParseResult};

/// One submitted input and what it parsed to
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Text as submitted
    pub input: String,
    /// Catalog language at submit time
    pub language: Language,
    /// Parse outcome
    pub result: ParseResult,
    /// When the input was submitted
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    /// Short outcome label for the history list.
    pub fn outcome_label(&self) -> String {
        match &self.result {
            ParseResult::Success { chapters, .. } => format!("✓ {} chapter(s)", chapters.len()),
            ParseResult::Suggestion(s) => format!("? {}", s.kind()),
            ParseResult::Error(e) => format!("✗ {}", e.i18n_key()),
        }
    }
}

/// Test bench application state
pub struct App {
    /// Loaded configuration
    pub config: Config,
    /// Book catalogs for every language
    pub catalogs: LanguageCatalogs,
    /// Text being typed
    pub input: String,
    /// Book applied when an input carries no book name
    pub default_book: Option<BookEntry>,
    /// Input that produced `last_result`
    pub last_input: String,
    /// Outcome shown in the result panel
    pub last_result: Option<ParseResult>,
    /// Newest first, capped at `config.history_limit`
    pub history: Vec<HistoryEntry>,
    /// Text typed after ':'
    pub command_buffer: String,
    /// Whether keys go to the command bar
    pub is_command_mode: bool,
    /// Set once the user asks to leave
    pub should_quit: bool,
    /// Blocking error modal text
    pub error_message: Option<String>,
    /// Blocking info modal text
    pub status_message: Option<String>,
    /// Whether the help modal is open
    pub show_help: bool,
}

impl App {
    /// Build the bench from a loaded configuration.
    pub fn new(config: Config) -> Result<Self> {
        let catalogs = config.catalogs()?;
        tracing::info!(
            "Test bench starting with language {} ({} books)",
            catalogs.current_language().code(),
            catalogs.current_books().len()
        );

        Ok(Self {
            config,
            catalogs,
            input: String::new(),
            default_book: None,
            last_input: String::new(),
            last_result: None,
            history: Vec::new(),
            command_buffer: String::new(),
            is_command_mode: false,
            should_quit: false,
            error_message: None,
            status_message: None,
            show_help: false,
        })
    }

    /// Whether the event loop should stop.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Ask the event loop to stop.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Active catalog language.
    pub fn language(&self) -> Language {
        self.catalogs.current_language()
    }

    /// Route one key press according to the current modal state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Help modal swallows everything but its own dismiss keys
        if self.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::F(1) || key.code == KeyCode::Char('?') {
                self.show_help = false;
            }
            return;
        }

        if self.error_message.is_some() {
            if key.code == KeyCode::Esc {
                self.error_message = None;
            }
            return;
        }
        if self.status_message.is_some() {
            if key.code == KeyCode::Esc {
                self.status_message = None;
            }
            return;
        }

        if key.code == KeyCode::F(1) {
            self.show_help = true;
            return;
        }

        if self.is_command_mode {
            self.handle_command_input(key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.quit(),
                KeyCode::Char('u') => self.input.clear(),
                _ => {}
            }
            return;
        }

        self.handle_input_key(key);
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            // ':' only starts a command on an empty line, otherwise it is part of "3:16"
            KeyCode::Char(':') if self.input.is_empty() => {
                self.is_command_mode = true;
                self.command_buffer.clear();
            }
            KeyCode::Char('?') if self.input.is_empty() => {
                self.show_help = true;
            }
            KeyCode::Char(c @ '1'..='9') if self.input.is_empty() && self.pending_candidates() > 0 => {
                let index = c as usize - '1' as usize;
                self.accept_suggestion(index);
            }
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => self.cycle_language(),
            KeyCode::Up => {
                if let Some(entry) = self.history.first() {
                    self.input.clone_from(&entry.input);
                }
            }
            KeyCode::Esc => {
                if self.input.is_empty() {
                    self.last_result = None;
                } else {
                    self.input.clear();
                }
            }
            _ => {}
        }
    }

    fn handle_command_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.is_command_mode = false;
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                self.execute_command();
                self.is_command_mode = false;
                self.command_buffer.clear();
            }
            KeyCode::Backspace => {
                if self.command_buffer.pop().is_none() {
                    self.is_command_mode = false;
                }
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
            }
            _ => {}
        }
    }

    /// Run the command in `command_buffer`.
    pub fn execute_command(&mut self) {
        let command = self.command_buffer.trim().to_string();
        let (name, argument) = command
            .split_once(char::is_whitespace)
            .map_or((command.as_str(), ""), |(n, a)| (n, a.trim()));

        match name {
            "q" | "quit" => self.quit(),
            "h" | "help" => self.show_help = true,
            "clear" => {
                self.history.clear();
                self.last_result = None;
                self.last_input.clear();
            }
            "copy" => match self.copy_result() {
                Ok(()) => self.status_message = Some("Result copied to clipboard".to_string()),
                Err(e) => self.error_message = Some(e.to_string()),
            },
            "book" => self.set_default_book(argument),
            "lang" => match Language::from_code(argument) {
                Some(language) => self.set_language(language),
                None => self.error_message = Some(format!("Unknown language '{argument}'")),
            },
            "" => {}
            other => self.error_message = Some(format!("Unknown command ':{other}'")),
        }
    }

    /// Parse the typed input and record it.
    pub fn submit(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }
        self.run_parse(&input);
        self.input.clear();
    }

    fn run_parse(&mut self, input: &str) {
        let result = parse_reading_input(input, self.default_book.as_ref(), self.catalogs.current_books());
        tracing::info!("Bench input '{input}' -> {}", outcome_name(&result));

        self.history.insert(
            0,
            HistoryEntry {
                input: input.to_string(),
                language: self.language(),
                result: result.clone(),
                timestamp: Local::now(),
            },
        );
        self.history.truncate(self.config.history_limit);

        self.last_input = input.to_string();
        self.last_result = Some(result);
    }

    /// Candidates selectable with the number keys.
    pub fn pending_candidates(&self) -> usize {
        self.last_result
            .as_ref()
            .and_then(ParseResult::suggestion)
            .map_or(0, crate::reading::Suggestion::candidate_count)
    }

    /// Take candidate `index` of the pending suggestion and parse again.
    pub fn accept_suggestion(&mut self, index: usize) {
        let corrected = self
            .last_result
            .as_ref()
            .and_then(ParseResult::suggestion)
            .and_then(|s| s.accept(index));

        if let Some(corrected) = corrected {
            tracing::debug!("Accepted suggestion {} -> '{corrected}'", index + 1);
            self.run_parse(&corrected);
        }
    }

    fn cycle_language(&mut self) {
        self.set_language(self.language().next());
    }

    /// Switch catalogs, carrying the default book over by number.
    pub fn set_language(&mut self, language: Language) {
        self.catalogs.set_current_language(language);
        let number = self.default_book.as_ref().map(|b| b.number);
        self.default_book = number.and_then(|n| self.catalogs.current_books().by_number(n).cloned());
    }

    fn set_default_book(&mut self, name: &str) {
        if name.is_empty() {
            self.default_book = None;
            return;
        }
        let found = resolve_book(name, self.catalogs.current_books());
        match found.book {
            Some(book) if found.confidence.is_resolved() => {
                tracing::debug!("Default book set to {}", book.name);
                self.default_book = Some(book.clone());
            }
            _ => {
                let hint = found
                    .suggestions
                    .iter()
                    .map(|b| b.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.error_message = Some(if hint.is_empty() {
                    format!("No book matches '{name}'")
                } else {
                    format!("No book matches '{name}'. Did you mean: {hint}?")
                });
            }
        }
    }

    /// Last result as pretty JSON.
    pub fn result_json(&self) -> Result<String> {
        let result = self
            .last_result
            .as_ref()
            .ok_or_else(|| Error::Msg("Nothing to copy yet".to_string()))?;
        serde_json::to_string_pretty(result).map_err(|e| Error::Msg(e.to_string()))
    }

    fn copy_result(&self) -> Result<()> {
        let json = self.result_json()?;
        Clipboard::new()
            .and_then(|mut cb| cb.set_text(json))
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

fn outcome_name(result: &ParseResult) -> &'static str {
    match result {
        ParseResult::Success { .. } => "success",
        ParseResult::Suggestion(s) => s.kind(),
        ParseResult::Error(e) => e.i18n_key(),
    }
}
