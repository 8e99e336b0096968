//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the test bench's
//! terminal-based user interface using ratatui.

mod history;
mod result_panel;

pub use history::draw_history;
pub use result_panel::{draw_result, result_lines};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::constants::ui::{INPUT_HEIGHT, RESULT_SPLIT_PERCENT};

/// Render the full application UI to the terminal frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    draw_input(f, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(RESULT_SPLIT_PERCENT),
            Constraint::Percentage(100 - RESULT_SPLIT_PERCENT),
        ])
        .split(chunks[1]);
    draw_result(f, app, body[0]);
    draw_history(f, app, body[1]);

    draw_command_bar(f, app, chunks[2]);

    // Blocking modals
    if let Some(status) = &app.status_message {
        draw_status_message(f, status);
        return;
    }
    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let default_book = app
        .default_book
        .as_ref()
        .map_or_else(String::new, |b| format!(" | default book: {}", b.name));
    let title = format!("Reading [{}]{default_book}", app.language().name());

    let is_focused = !app.is_command_mode;
    let input = Paragraph::new(format!(" {}", app.input))
        .style(Style::default().fg(Color::White))
        .block(create_titled_block(&title, is_focused));
    f.render_widget(input, area);

    if is_focused && app.error_message.is_none() && app.status_message.is_none() && !app.show_help {
        // One column border plus one column padding
        f.set_cursor(area.x + 2 + app.input.width() as u16, area.y + 1);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.is_command_mode { "Command" } else { "Commands/Status" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(title, Style::default().fg(Color::Yellow)));

    f.render_widget(block, area);

    // Calculate the inner area to render text with more padding
    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin of 1 to account for the border
        .split(area)[0];

    if app.is_command_mode {
        let command = Paragraph::new(format!(" :{}", app.command_buffer)).style(Style::default().fg(Color::Yellow));
        f.render_widget(command, inner_area);
        f.set_cursor(inner_area.left() + app.command_buffer.width() as u16 + 2, inner_area.top());
    } else {
        let mut hints = vec![("Enter", "Parse"), ("Tab", "Language")];
        if app.pending_candidates() > 0 {
            hints.push(("1-9", "Accept"));
        }
        hints.extend([(":book", "Default book"), (":copy", "Copy JSON"), ("F1", "Help"), (":q", "Quit")]);

        let status_bar = Paragraph::new(Line::from(create_help_text(&hints))).style(Style::default().fg(Color::Gray));
        f.render_widget(status_bar, inner_area);
    }
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let title_style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn centered(size: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

// Draw an error message overlay
fn draw_error_message(f: &mut Frame, message: &str) {
    let size = f.size();
    let area = centered(size, 50.min(size.width.saturating_sub(4)), 6);

    let block = Block::default()
        .title(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area); // Clear the area first
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // Space for a "Press Esc to dismiss" hint
        ])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(hint, inner_area[1]);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_status_message(f: &mut Frame, message: &str) {
    let size = f.size();

    // Max 80% of screen, min 40
    let max_width = (size.width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(40) as u16;
    let area = centered(size, width, 4);

    let block = Block::default()
        .title(Span::styled("Info", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(hint, inner_area[1]);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame) {
    let size = f.size();
    let area = centered(
        size,
        60.min(size.width.saturating_sub(4)),
        24.min(size.height.saturating_sub(4)),
    );

    let block = Block::default()
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let help_text: Vec<Line> = HELP_CONTENT
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(vec![Span::styled(
                    *key,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )])
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>14}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

const HELP_CONTENT: &[(&str, &str, bool)] = &[
    ("── Input ──", "", true),
    ("Enter", "Parse the reading", false),
    ("Tab", "Next catalog language", false),
    ("1-9", "Accept a suggestion (empty input)", false),
    ("↑", "Recall last input", false),
    ("Esc", "Clear input / result", false),
    ("Ctrl+U", "Clear input", false),
    ("", "", false),
    ("── Commands ──", "", true),
    (":book <name>", "Set default book", false),
    (":book", "Clear default book", false),
    (":lang <code>", "Switch language (de, en, ...)", false),
    (":copy", "Copy result JSON", false),
    (":clear", "Clear history", false),
    (":q / :quit", "Quit", false),
    ("", "", false),
    ("── Examples ──", "", true),
    ("3-4:15", "Ch. 3, ch. 4 to v. 15", false),
    ("Isa 3:1,2; 4:15", "Two partial chapters", false),
    ("", "", false),
    ("Press Esc, F1 or ? to close", "", true),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_text_separators() {
        let spans = create_help_text(&[("Enter", "Parse"), (":q", "Quit")]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " Enter: Parse | :q: Quit");
    }

    #[test]
    fn test_centered_rect() {
        let area = centered(Rect::new(0, 0, 100, 40), 50, 6);
        assert_eq!((area.x, area.y, area.width, area.height), (25, 17, 50, 6));
    }
}
