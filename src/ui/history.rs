use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::app::{App, HistoryEntry};
use crate::reading::ParseResult;
use crate::ui::create_titled_block;

/// Render past parses, newest first.
pub fn draw_history(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app.history.iter().map(history_item).collect();

    let title = format!("History ({}/{})", app.history.len(), app.config.history_limit);
    let list = List::new(items).block(create_titled_block(&title, false));

    f.render_widget(list, area);
}

fn history_item(entry: &HistoryEntry) -> ListItem<'static> {
    let outcome_color = match entry.result {
        ParseResult::Success { .. } => Color::Green,
        ParseResult::Suggestion(_) => Color::Cyan,
        ParseResult::Error(_) => Color::Red,
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(entry.timestamp.format("%H:%M:%S ").to_string(), Style::default().fg(Color::Gray)),
            Span::styled(format!("[{}] ", entry.language.code()), Style::default().fg(Color::LightBlue)),
            Span::styled(entry.input.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            format!("         {}", entry.outcome_label()),
            Style::default().fg(outcome_color),
        )),
    ])
}
