//! Top-level frame renderer.
//!
//! Splits the screen into a path bar, the main pane (table or tree) and a
//! status line, then draws the active overlay above them. Reads state only;
//! every mutation stays in the app layer.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::browser::BrowserMode;
use crate::app::register::PasteKind;
use crate::app::state::{ActionMode, AppState, PromptKind};
use crate::core::format::clip_to_width;
use crate::ui::{overlays, table, tree};
use crate::utils::shorten_home_path;

pub fn render(frame: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_path_bar(frame, app, chunks[0]);

    match app.options().mode {
        BrowserMode::Table => table::draw(frame, app, chunks[1]),
        BrowserMode::Tree => tree::draw(frame, app, chunks[1]),
    }

    draw_status_line(frame, app, chunks[2]);

    match app.mode() {
        ActionMode::Normal => {}
        ActionMode::Prompt { kind, buffer } => {
            overlays::draw_prompt(frame, prompt_title(kind), buffer);
        }
        ActionMode::ConfirmDelete { target } => {
            overlays::draw_confirm(frame, target);
        }
        ActionMode::Info => {
            if let Some(entry) = app.selected_entry() {
                overlays::draw_info(frame, entry);
            }
        }
        ActionMode::Error { message, .. } => {
            overlays::draw_error(frame, message);
        }
    }
}

fn prompt_title(kind: &PromptKind) -> &'static str {
    match kind {
        PromptKind::Search => "Filter",
        PromptKind::NewFile => "New file",
        PromptKind::NewDir => "New directory",
        PromptKind::Rename { .. } => "Rename to",
        PromptKind::PasteName => "Paste as",
    }
}

fn draw_path_bar(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![Span::styled(
        shorten_home_path(app.current_dir()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if !app.filter().is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[filter: {}]", app.filter()),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let line = if let Some(status) = app.status() {
        Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Green),
        ))
    } else if let Some(pending) = app.register().pending() {
        let (verb, path) = match (pending, app.register().marked_path()) {
            (PasteKind::Copy, Some(p)) => ("copy", p),
            (PasteKind::Move, Some(p)) => ("move", p),
            _ => return,
        };
        let text = format!("{verb}: {} (p to paste)", shorten_home_path(path));
        Line::from(Span::styled(
            clip_to_width(&text, area.width as usize),
            Style::default().fg(Color::Magenta),
        ))
    } else {
        Line::from(Span::styled(
            format!("{} items", app.snapshot().len()),
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}
