//! Side-by-side view with synchronized scrolling

use crate::app::App;
use crate::config::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sidediff_core::{Content, DiffLine, Side, SpanState};
use unicode_width::UnicodeWidthStr;

/// Spaces a tab expands to
const TAB_WIDTH: usize = 4;

/// Render both panes; they share one scroll offset so rows stay aligned
pub fn render_split(frame: &mut Frame, app: &mut App, area: Rect) {
    app.refresh();
    let visible_height = area.height as usize;
    let total_rows = app.row_count();
    app.clamp_scroll(total_rows, visible_height);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let gutter = gutter_width(app);
    // Left pane loses one column to its border
    let visible_width = chunks[0].width.saturating_sub(gutter + 1) as usize;
    let max_width = visible_max_width(app, visible_height);
    app.clamp_horizontal_scroll(max_width, visible_width);

    render_pane(frame, app, Side::Original, chunks[0], gutter);
    render_pane(frame, app, Side::Modified, chunks[1], gutter);
}

/// Gutter width shared by both panes: widest line number plus one space
pub(crate) fn gutter_width(app: &App) -> u16 {
    if !app.show_line_numbers {
        return 0;
    }
    let max_number = app
        .panes()
        .map(|panes| {
            let left = panes.original().max_line_number().unwrap_or(0);
            let right = panes.modified().max_line_number().unwrap_or(0);
            left.max(right)
        })
        .unwrap_or(0);
    max_number.max(1).to_string().len() as u16 + 1
}

fn visible_max_width(app: &App, visible_height: usize) -> usize {
    let Some(panes) = app.panes() else {
        return 0;
    };
    panes
        .rows()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(left, right)| line_width(left).max(line_width(right)))
        .max()
        .unwrap_or(0)
}

fn render_pane(frame: &mut Frame, app: &App, side: Side, area: Rect, gutter: u16) {
    let Some(panes) = app.panes() else {
        return;
    };
    let content = panes.content(side);

    let constraints = match side {
        Side::Original => vec![
            Constraint::Length(gutter),
            Constraint::Min(0),
            Constraint::Length(1), // For border
        ],
        Side::Modified => vec![Constraint::Length(gutter), Constraint::Min(0)],
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);
    let gutter_area = chunks[0];
    let content_area = chunks[1];

    let (gutter_lines, content_lines) = build_pane_lines(
        content,
        &app.theme,
        app.scroll_offset,
        area.height as usize,
        content_area.width as usize + app.horizontal_scroll,
        gutter,
    );

    if gutter > 0 {
        frame.render_widget(Paragraph::new(gutter_lines), gutter_area);
    }
    frame.render_widget(
        Paragraph::new(content_lines)
            .scroll((0, u16::try_from(app.horizontal_scroll).unwrap_or(u16::MAX))),
        content_area,
    );

    if side == Side::Original {
        let border = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(app.theme.border));
        frame.render_widget(border, chunks[2]);
    }
}

/// Gutter and content lines for the visible rows of one pane.
/// `fill_width` is the column a newline-terminated row is padded to.
pub(crate) fn build_pane_lines(
    content: &Content,
    theme: &Theme,
    scroll_offset: usize,
    height: usize,
    fill_width: usize,
    gutter: u16,
) -> (Vec<Line<'static>>, Vec<Line<'static>>) {
    let mut gutter_lines = Vec::with_capacity(height);
    let mut content_lines = Vec::with_capacity(height);
    let number_width = (gutter as usize).saturating_sub(1);

    for line in content.lines().iter().skip(scroll_offset).take(height) {
        let number = match line.line_number() {
            Some(n) => format!("{:>width$} ", n, width = number_width),
            None => " ".repeat(gutter as usize),
        };
        gutter_lines.push(Line::from(Span::styled(
            number,
            Style::default().fg(theme.line_number),
        )));
        content_lines.push(content_line(line, theme, fill_width));
    }

    (gutter_lines, content_lines)
}

fn content_line(line: &DiffLine, theme: &Theme, fill_width: usize) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::with_capacity(line.spans().len() + 1);
    let mut width = 0;
    for span in line.spans() {
        let text = display_text(span.visible_text());
        if text.is_empty() {
            continue;
        }
        width += text.width();
        spans.push(Span::styled(text, span_style(span.state(), theme)));
    }

    // Carry the row's final highlight to the pane edge
    if let Some(last) = line.last_span().filter(|span| span.ends_with_newline()) {
        if fill_width > width {
            spans.push(Span::styled(
                " ".repeat(fill_width - width),
                span_style(last.state(), theme),
            ));
        }
    }
    Line::from(spans)
}

fn span_style(state: SpanState, theme: &Theme) -> Style {
    match state {
        SpanState::Unchanged => Style::default().fg(theme.text),
        SpanState::Added => Style::default().fg(theme.added_fg).bg(theme.added_bg),
        SpanState::Removed => Style::default().fg(theme.removed_fg).bg(theme.removed_bg),
        SpanState::Spacer => Style::default().bg(theme.spacer),
    }
}

/// Text as drawn: tabs expanded, carriage returns dropped
pub(crate) fn display_text(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH)).replace('\r', "")
}

fn line_width(line: &DiffLine) -> usize {
    line.spans()
        .iter()
        .map(|span| display_text(span.visible_text()).width())
        .sum()
}
