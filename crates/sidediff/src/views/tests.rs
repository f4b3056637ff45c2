use super::split::{build_pane_lines, gutter_width};
use super::*;
use crate::app::App;
use crate::config::Theme;
use crate::input::Input;
use crate::ui;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use sidediff_core::{build_panes, DiffEngine, Operation};

fn make_app(old: &str, new: &str) -> App {
    App::new(
        Input::from_text("old.txt", old),
        Input::from_text("new.txt", new),
        DiffEngine::new(),
    )
}

fn render_split_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal
        .draw(|frame| {
            let area = frame.area();
            render_split(frame, app, area);
        })
        .expect("draw");
    terminal.backend().buffer().clone()
}

fn render_full_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("terminal");
    terminal.draw(|frame| ui::draw(frame, app)).expect("draw");
    terminal.backend().buffer().clone()
}

fn buffer_text(buf: &Buffer) -> Vec<String> {
    let mut lines = Vec::new();
    for y in 0..buf.area.height {
        let mut line = String::new();
        for x in 0..buf.area.width {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line);
    }
    lines
}

#[test]
fn test_split_rows_are_aligned() {
    let mut app = make_app("foo\nbar\n", "foo\nbaz\n");
    let buf = render_split_buffer(&mut app, 40, 5);
    let lines = buffer_text(&buf);

    assert!(lines[0].starts_with("1 foo"), "{:?}", lines[0]);
    assert!(lines[0].contains("│1 foo"), "{:?}", lines[0]);
    assert!(lines[1].starts_with("2 bar"), "{:?}", lines[1]);
    assert!(lines[1].contains("│2 baz"), "{:?}", lines[1]);
    assert!(lines[2].starts_with("3 "), "{:?}", lines[2]);
    // Border runs the full height
    assert!(lines[4].contains('│'));
}

#[test]
fn test_changed_text_is_highlighted() {
    let mut app = make_app("foo\nbar\n", "foo\nbaz\n");
    let buf = render_split_buffer(&mut app, 40, 5);
    // Left pane: gutter "2 " then "ba" then the removed "r"
    assert_eq!(buf[(4, 1)].symbol(), "r");
    assert_eq!(buf[(4, 1)].bg, app.theme.removed_bg);
    assert_ne!(buf[(3, 1)].bg, app.theme.removed_bg);
    // Right pane starts after the 20-column left half
    assert_eq!(buf[(24, 1)].symbol(), "z");
    assert_eq!(buf[(24, 1)].bg, app.theme.added_bg);
}

#[test]
fn test_filler_rows_have_blank_gutter() {
    let mut app = make_app("a\n", "a\nb\nc\n");
    let buf = render_split_buffer(&mut app, 40, 5);
    let lines = buffer_text(&buf);

    assert!(lines[0].starts_with("1 a"));
    assert!(lines[2].starts_with("  "), "{:?}", lines[2]);
    assert!(lines[2].contains("│3 c"), "{:?}", lines[2]);
    assert!(lines[3].starts_with("  "), "{:?}", lines[3]);
    assert!(lines[3].contains("│4"), "{:?}", lines[3]);
}

#[test]
fn test_hidden_line_numbers() {
    let mut app = make_app("foo\n", "fob\n");
    app.show_line_numbers = false;
    assert_eq!(gutter_width(&app), 0);
    let buf = render_split_buffer(&mut app, 40, 3);
    let lines = buffer_text(&buf);
    assert!(lines[0].starts_with("foo"), "{:?}", lines[0]);
    assert!(lines[0].contains("│fob"), "{:?}", lines[0]);
}

#[test]
fn test_gutter_width_grows_with_line_count() {
    let text: String = (1..=120).map(|n| format!("{n}\n")).collect();
    let app = make_app(&text, &text);
    // 121 numbered rows
    assert_eq!(gutter_width(&app), 4);
}

#[test]
fn test_scroll_offset_is_shared_and_clamped() {
    let text: String = (1..=10).map(|n| format!("line {n}\n")).collect();
    let mut app = make_app(&text, &text);
    app.scroll_offset = 3;
    let lines = buffer_text(&render_split_buffer(&mut app, 40, 4));
    assert!(lines[0].starts_with(" 4 line 4"), "{:?}", lines[0]);
    assert!(lines[0].contains("│ 4 line 4"), "{:?}", lines[0]);

    app.scroll_offset = 100;
    render_split_buffer(&mut app, 40, 4);
    // 11 rows in a 4-row viewport
    assert_eq!(app.scroll_offset, 7);
}

#[test]
fn test_horizontal_scroll() {
    let text = "0123456789abcdefghijklmnopqrstuvwxyz\n";
    let mut app = make_app(text, text);
    app.horizontal_scroll = 4;
    let lines = buffer_text(&render_split_buffer(&mut app, 40, 3));
    assert!(lines[0].starts_with("1 456789abc"), "{:?}", lines[0]);
    assert!(lines[0].contains("│1 456789abc"), "{:?}", lines[0]);

    // Short rows cannot be scrolled past their end
    let mut app = make_app("short\n", "short\n");
    app.horizontal_scroll = 4;
    render_split_buffer(&mut app, 40, 3);
    assert_eq!(app.horizontal_scroll, 0);
}

#[test]
fn test_pane_lines_fill_changed_rows() {
    let panes = build_panes([(Operation::Delete, "gone\n"), (Operation::Equal, "kept")]);
    let theme = Theme::default();
    let (gutter, content) = build_pane_lines(panes.original(), &theme, 0, 10, 12, 2);

    assert_eq!(gutter.len(), 2);
    assert_eq!(gutter[0].to_string(), "1 ");
    assert_eq!(gutter[1].to_string(), "2 ");
    assert_eq!(content[0].width(), 12);
    let fill = content[0].spans.last().expect("fill span");
    assert_eq!(fill.style.bg, Some(theme.removed_bg));
    // Last row has no newline and is not padded
    assert_eq!(content[1].to_string(), "kept");

    let (_, content) = build_pane_lines(panes.modified(), &theme, 0, 10, 12, 2);
    assert_eq!(content[0].spans.last().expect("spacer").style.bg, Some(theme.spacer));
}

#[test]
fn test_display_text_expands_tabs() {
    assert_eq!(display_text("\tx\r"), "    x");
}

#[test]
fn test_status_bar() {
    let mut app = make_app("foo\nbar\n", "foo\nbaz\n");
    app.next_change();
    let lines = buffer_text(&render_full_buffer(&mut app, 100, 4));
    let status = &lines[3];
    assert!(status.contains("old.txt ↔ new.txt"), "{status:?}");
    assert!(status.contains("+1 -1"), "{status:?}");
    assert!(status.contains("row 1/3"), "{status:?}");
    assert!(status.contains("change 1/1"), "{status:?}");
}

#[test]
fn test_status_bar_identical() {
    let mut app = make_app("same\n", "same\n");
    let lines = buffer_text(&render_full_buffer(&mut app, 100, 3));
    assert!(lines[2].contains("identical"), "{:?}", lines[2]);
    assert!(lines[2].contains("+0 -0"), "{:?}", lines[2]);
}
