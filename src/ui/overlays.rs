//! Modal dialogs drawn above the main pane.
//!
//! Prompts collect a line of input, the delete confirmation asks before a
//! destructive operation, the info dialog shows the full metadata of the
//! selected entry, and the error dialog shows a failed scan or file
//! operation above the last good view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::path::Path;

use crate::core::entry::Entry;
use crate::core::format::{format_entry_size, format_entry_time};
use crate::utils::shorten_home_path;

/// A fixed-height box centered horizontally, sized to `percent_x` of the
/// frame width.
fn centered_box(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn draw_prompt(frame: &mut Frame, title: &str, buffer: &str) {
    let area = centered_box(frame.area(), 50, 3);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title.to_string());

    let input = Line::from(vec![
        Span::raw(buffer.to_string()),
        Span::styled("█", Style::default().fg(Color::Cyan)),
    ]);

    frame.render_widget(Paragraph::new(input).block(block), area);
}

pub fn draw_confirm(frame: &mut Frame, target: &Path) {
    let area = centered_box(frame.area(), 60, 4);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title("Delete");

    let lines = vec![
        Line::from(Span::raw(shorten_home_path(target))),
        Line::from(Span::styled(
            "y: delete    n: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn draw_info(frame: &mut Frame, entry: &Entry) {
    let area = centered_box(frame.area(), 60, 10);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title("File Info");

    let label = Style::default().fg(Color::Yellow);
    let row = |name: &str, value: String| {
        Line::from(vec![Span::styled(format!("{name:<10}"), label), Span::raw(value)])
    };

    let lines = vec![
        row("Name:", entry.name_str().into_owned()),
        row("Path:", shorten_home_path(entry.path())),
        row("Size:", format_entry_size(entry.size())),
        row("Perms:", entry.permission().to_string()),
        row("Owner:", format!("{}:{}", entry.owner(), entry.group())),
        row("Modified:", format_entry_time(Some(entry.modified()))),
        row("Accessed:", format_entry_time(Some(entry.accessed()))),
        row("Created:", format_entry_time(entry.created())),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn draw_error(frame: &mut Frame, message: &str) {
    let area = centered_box(frame.area(), 60, 4);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
        .title("Error");

    let lines = vec![
        Line::from(Span::raw(message.to_string())),
        Line::from(Span::styled(
            "press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
