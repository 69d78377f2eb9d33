//! Flat table pane.
//!
//! One metadata row per entry under a fixed header row. The header is not
//! selectable; the cursor row the app reports is 1-based with the header at
//! row 0, which maps directly onto [TableState] over the data rows.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Row, Table, TableState},
};

use crate::app::state::AppState;
use crate::core::entry::Entry;
use crate::core::format::{format_entry_size, format_entry_time};

const HEADER: [&str; 6] = ["Name", "Size", "Permission", "Owner", "Group", "Modified"];

pub fn draw(frame: &mut Frame, app: &AppState, area: Rect) {
    let rows: Vec<Row> = app
        .rows()
        .iter()
        .map(|row| make_row(row.entry))
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(19),
    ];

    let header = Row::new(HEADER.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    // cursor_row is 1-based under the header; TableState counts data rows
    let mut state = TableState::default();
    if !app.snapshot().is_empty() {
        state.select(Some(app.cursor_row().saturating_sub(1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

fn make_row(entry: &Entry) -> Row<'static> {
    let name_style = if entry.is_dir() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(entry.name_str().into_owned()).style(name_style),
        Cell::from(format_entry_size(entry.size())),
        Cell::from(entry.permission().to_string()),
        Cell::from(entry.owner().to_string()),
        Cell::from(entry.group().to_string()),
        Cell::from(format_entry_time(Some(entry.modified()))),
    ])
}
