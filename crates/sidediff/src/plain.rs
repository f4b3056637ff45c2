//! Plain-text side-by-side output for pipes and non-interactive use

use crate::views::display_text;
use sidediff_core::{DiffLine, Side, SideBySide};
use unicode_width::UnicodeWidthChar;

const SEPARATOR: &str = " │ ";
/// Display columns taken by `SEPARATOR`
const SEPARATOR_WIDTH: usize = 3;

/// Render both panes as fixed-width text, one aligned row per line
pub fn render_plain(panes: &SideBySide, width: usize, line_numbers: bool) -> String {
    let number_width = if line_numbers {
        let max_number = panes
            .original()
            .max_line_number()
            .max(panes.modified().max_line_number())
            .unwrap_or(1);
        max_number.to_string().len()
    } else {
        0
    };
    let cell_width = width.saturating_sub(SEPARATOR_WIDTH) / 2;
    let gutter = if line_numbers { number_width + 1 } else { 0 };
    // Marker column plus one space
    let text_width = cell_width.saturating_sub(gutter + 2).max(1);

    let mut out = String::new();
    for (left, right) in panes.rows() {
        let mut row = cell(left, Side::Original, line_numbers, number_width, text_width);
        row.push_str(SEPARATOR);
        row.push_str(&cell(right, Side::Modified, line_numbers, number_width, text_width));
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

fn cell(line: &DiffLine, side: Side, line_numbers: bool, number_width: usize, text_width: usize) -> String {
    let mut cell = String::new();
    if line_numbers {
        match line.line_number() {
            Some(n) => cell.push_str(&format!("{:>width$} ", n, width = number_width)),
            None => cell.push_str(&" ".repeat(number_width + 1)),
        }
    }
    let marker = match side {
        _ if !line.has_changes() => ' ',
        Side::Original => '-',
        Side::Modified => '+',
    };
    cell.push(marker);
    cell.push(' ');
    cell.push_str(&fit(&display_text(&line.text()), text_width));
    cell
}

/// Clip `text` to `width` display columns and pad it to exactly that width
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(&" ".repeat(width - used));
    out
}
