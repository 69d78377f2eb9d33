//! Expandable tree pane.
//!
//! Renders the flattened tree rows with two spaces of indent per depth level
//! and an expansion marker in front of directories.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

use crate::app::browser::BrowserRow;
use crate::app::state::AppState;

pub fn draw(frame: &mut Frame, app: &AppState, area: Rect) {
    let rows = app.rows();

    let items: Vec<ListItem> = rows.iter().map(make_item).collect();

    let mut state = ListState::default();
    if !rows.is_empty() {
        state.select(Some(app.cursor_row().min(rows.len() - 1)));
    }

    frame.render_stateful_widget(
        List::new(items).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        area,
        &mut state,
    );
}

fn make_item<'a>(row: &BrowserRow<'a>) -> ListItem<'a> {
    let indent = "  ".repeat(row.depth);
    let marker = if row.entry.is_dir() {
        if row.expanded { "▾ " } else { "▸ " }
    } else {
        "  "
    };

    let style = if row.entry.is_dir() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    ListItem::new(Line::from(vec![
        Span::raw(indent),
        Span::raw(marker),
        Span::styled(row.entry.name_str().into_owned(), style),
    ]))
}
