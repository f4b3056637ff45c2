//! Top-level layout: panes plus status bar

use crate::app::App;
use crate::views::render_split;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rows taken by the status bar
pub const STATUS_HEIGHT: u16 = 1;

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    render_split(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let base = Style::default().bg(app.theme.status_bg);
    let stats = app.panes().map(|panes| panes.stats()).unwrap_or_default();
    let total = app.row_count();
    let row = if total == 0 { 0 } else { app.scroll_offset + 1 };

    let mut spans = vec![
        Span::styled(
            format!(" {} ↔ {} ", app.old.label(), app.new.label()),
            base.add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" +{}", stats.insertions), base.fg(app.theme.added_fg)),
        Span::styled(format!(" -{}", stats.deletions), base.fg(app.theme.removed_fg)),
        Span::styled(format!("  row {}/{}", row, total), base),
    ];
    if let Some((current, count)) = app.change_position() {
        spans.push(Span::styled(format!("  change {}/{}", current, count), base));
    }
    if stats.changed_rows == 0 {
        spans.push(Span::styled("  identical", base.add_modifier(Modifier::DIM)));
    }
    if let Some(message) = &app.status_message {
        spans.push(Span::styled(format!("  {}", message), base.add_modifier(Modifier::ITALIC)));
    }
    spans.push(Span::styled(
        "  n/N change  r reload  q quit",
        base.add_modifier(Modifier::DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}
