use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::reading::{format_chapter_status, next_reading, ParseErrorKind, ParseResult, Suggestion};
use crate::ui::create_titled_block;

/// Render the outcome of the last parse.
pub fn draw_result(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.last_input.is_empty() {
        "Result".to_string()
    } else {
        format!("Result: {}", app.last_input)
    };

    let lines = match &app.last_result {
        None => vec![Line::from(Span::styled(
            "Type a reading such as \"Isa 3-4:15\" and press Enter",
            Style::default().fg(Color::Gray),
        ))],
        Some(result) => result_lines(result),
    };

    let paragraph = Paragraph::new(lines)
        .block(create_titled_block(&title, false))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Styled lines describing a parse result.
pub fn result_lines(result: &ParseResult) -> Vec<Line<'static>> {
    match result {
        ParseResult::Success { book, chapters } => {
            let heading = book
                .as_ref()
                .map_or_else(|| "No book".to_string(), |b| format!("{} ({} chapters)", b.name, b.chapters));
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("✓ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::styled(heading, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                ]),
                Line::from(""),
            ];
            for entry in chapters {
                let mut spans = vec![
                    Span::styled(format!("{:>4}  ", entry.chapter), Style::default().fg(Color::Yellow)),
                    Span::raw(format_chapter_status(Some(entry))),
                ];
                if let Some(next) = next_reading(Some(entry)) {
                    spans.push(Span::styled(format!("  ({next})"), Style::default().fg(Color::Gray)));
                }
                lines.push(Line::from(spans));
            }
            lines
        }
        ParseResult::Suggestion(suggestion) => suggestion_lines(suggestion),
        ParseResult::Error(kind) => error_lines(kind),
    }
}

fn suggestion_lines(suggestion: &Suggestion) -> Vec<Line<'static>> {
    let heading = match suggestion {
        Suggestion::DidYouMean { input, .. } => format!("Did you mean... (\"{input}\")"),
        Suggestion::Unclear { input, .. } => format!("\"{input}\" is unclear, possible books:"),
        Suggestion::NotFound { input, .. } => format!("No book found for \"{input}\""),
        Suggestion::InvalidChapter { book, input, .. } => {
            format!("{} has only {} chapters, did you mean \"{input}\" as:", book.name, book.chapters)
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("? {heading}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let descriptions: Vec<String> = match suggestion {
        Suggestion::InvalidChapter { candidates, .. } => candidates.iter().map(|c| c.description()).collect(),
        _ => suggestion.candidate_labels(),
    };
    for (i, description) in descriptions.into_iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", i + 1), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(description),
        ]));
    }

    if suggestion.candidate_count() > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press a number to accept",
            Style::default().fg(Color::Gray),
        )));
    }
    lines
}

fn error_lines(kind: &ParseErrorKind) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("✗ {kind}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(kind.i18n_key().to_string(), Style::default().fg(Color::Gray))),
    ]
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::{BookCatalog, Language};
    use crate::reading::parse_reading_input;

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_success_lines_list_chapter_status() {
        let catalog = BookCatalog::embedded(Language::En).unwrap();
        let result = parse_reading_input("Isa 3-4:15", None, &catalog);
        let lines = text(&result_lines(&result));
        assert_eq!(lines[0], "✓ Isaiah (66 chapters)");
        assert_eq!(lines[2], "   3  Completely read");
        assert_eq!(lines[3], "   4  Up to verse 15  (Continue from verse 16)");
    }

    #[test]
    fn test_suggestion_lines_number_candidates() {
        let catalog = BookCatalog::embedded(Language::En).unwrap();
        let result = parse_reading_input("Genisis 1", None, &catalog);
        let lines = text(&result_lines(&result));
        assert!(lines[0].starts_with("? Did you mean"));
        assert_eq!(lines[2], "  [1] Genesis");
        assert_eq!(lines.last().unwrap(), "Press a number to accept");
    }

    #[test]
    fn test_error_lines_carry_key() {
        let lines = text(&result_lines(&ParseErrorKind::InvalidRange.into()));
        assert_eq!(lines[1], ParseErrorKind::InvalidRange.i18n_key());
    }
}
