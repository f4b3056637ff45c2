//! Application state and logic

use crate::config::Theme;
use crate::input::Input;
use sidediff_core::{DiffEngine, PaneCache, SideBySide};

#[cfg(test)]
mod tests;

/// Rows kept above a change when jumping to it
const CHANGE_CONTEXT_ROWS: usize = 2;

/// Columns moved per horizontal scroll step
const HORIZONTAL_STEP: usize = 4;

pub(crate) fn max_scroll(total_rows: usize, viewport_height: usize) -> usize {
    total_rows.saturating_sub(viewport_height)
}

/// The main application state
pub struct App {
    /// Left input
    pub old: Input,
    /// Right input
    pub new: Input,
    engine: DiffEngine,
    /// Panes for the current pair of texts
    cache: PaneCache,
    /// Shared vertical scroll offset of both panes
    pub scroll_offset: usize,
    /// Shared horizontal scroll offset of both panes
    pub horizontal_scroll: usize,
    /// Rows moved per scroll step
    pub scroll_step: usize,
    /// Row of the change block last jumped to
    pub current_change: Option<usize>,
    pub show_line_numbers: bool,
    pub theme: Theme,
    /// One-line message shown in the status bar (reload results, errors)
    pub status_message: Option<String>,
    /// Whether to quit
    pub should_quit: bool,
}

impl App {
    pub fn new(old: Input, new: Input, engine: DiffEngine) -> Self {
        let mut app = Self {
            old,
            new,
            engine,
            cache: PaneCache::new(),
            scroll_offset: 0,
            horizontal_scroll: 0,
            scroll_step: 1,
            current_change: None,
            show_line_numbers: true,
            theme: Theme::default(),
            status_message: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Recompute the panes if either text changed since the last render
    pub fn refresh(&mut self) {
        let Self {
            cache,
            old,
            new,
            engine,
            ..
        } = self;
        cache.get_or_compute(&old.text, &new.text, |old, new| engine.compare(old, new));
    }

    pub fn panes(&self) -> Option<&SideBySide> {
        self.cache.current()
    }

    pub fn cache(&self) -> &PaneCache {
        &self.cache
    }

    pub fn row_count(&self) -> usize {
        self.panes().map(SideBySide::row_count).unwrap_or(0)
    }

    /// Re-read both inputs from disk and rebuild the panes
    pub fn reload(&mut self) {
        let mut errors = Vec::new();
        let mut changed = false;
        for input in [&mut self.old, &mut self.new] {
            match input.reload() {
                Ok(c) => changed |= c,
                Err(err) => {
                    tracing::warn!(input = %input.label(), error = %err, "reload failed");
                    errors.push(format!("{err:#}"));
                }
            }
        }
        self.refresh();
        if changed {
            self.current_change = None;
            let rows = self.row_count();
            self.scroll_offset = self.scroll_offset.min(rows.saturating_sub(1));
        }
        self.status_message = Some(if !errors.is_empty() {
            errors.join("; ")
        } else if changed {
            "Reloaded".to_string()
        } else {
            "No changes on disk".to_string()
        });
    }

    // ==================== Vertical Scrolling ====================

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(self.scroll_step);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(self.scroll_step);
    }

    pub fn scroll_half_page_down(&mut self, viewport_height: usize) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add((viewport_height / 2).max(1));
    }

    pub fn scroll_half_page_up(&mut self, viewport_height: usize) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_sub((viewport_height / 2).max(1));
    }

    pub fn goto_start(&mut self) {
        self.scroll_offset = 0;
        self.current_change = None;
    }

    pub fn goto_end(&mut self, viewport_height: usize) {
        self.scroll_offset = max_scroll(self.row_count(), viewport_height);
        self.current_change = None;
    }

    /// Keep the vertical offset inside the content
    pub fn clamp_scroll(&mut self, total_rows: usize, viewport_height: usize) {
        self.scroll_offset = self
            .scroll_offset
            .min(max_scroll(total_rows, viewport_height));
    }

    // ==================== Horizontal Scrolling ====================

    pub fn scroll_right(&mut self) {
        self.horizontal_scroll = self.horizontal_scroll.saturating_add(HORIZONTAL_STEP);
    }

    pub fn scroll_left(&mut self) {
        self.horizontal_scroll = self.horizontal_scroll.saturating_sub(HORIZONTAL_STEP);
    }

    pub fn scroll_to_line_start(&mut self) {
        self.horizontal_scroll = 0;
    }

    /// Keep the horizontal offset within the widest visible row. The
    /// terminal scroll offset is a u16, so wider rows stop at its maximum.
    pub fn clamp_horizontal_scroll(&mut self, max_line_width: usize, visible_width: usize) {
        self.horizontal_scroll = self
            .horizontal_scroll
            .min(max_line_width.saturating_sub(visible_width))
            .min(u16::MAX as usize);
    }

    // ==================== Change Navigation ====================

    /// Jump to the next change block. Returns false if there is none.
    pub fn next_change(&mut self) -> bool {
        let Some(panes) = self.panes() else {
            return false;
        };
        let target = match self.current_change {
            Some(row) => panes.next_change_row(row),
            None => panes
                .change_starts()
                .into_iter()
                .find(|&row| row >= self.scroll_offset),
        };
        self.jump_to_change(target)
    }

    /// Jump to the previous change block. Returns false if there is none.
    pub fn prev_change(&mut self) -> bool {
        let Some(panes) = self.panes() else {
            return false;
        };
        let from = self
            .current_change
            .unwrap_or(self.scroll_offset + CHANGE_CONTEXT_ROWS);
        let target = panes.prev_change_row(from);
        self.jump_to_change(target)
    }

    fn jump_to_change(&mut self, target: Option<usize>) -> bool {
        match target {
            Some(row) => {
                self.current_change = Some(row);
                self.scroll_offset = row.saturating_sub(CHANGE_CONTEXT_ROWS);
                true
            }
            None => {
                self.status_message = Some("No more changes".to_string());
                false
            }
        }
    }

    /// 1-based position of the current change among all change blocks
    pub fn change_position(&self) -> Option<(usize, usize)> {
        let panes = self.panes()?;
        let starts = panes.change_starts();
        let row = self.current_change?;
        let idx = starts.iter().position(|&start| start == row)?;
        Some((idx + 1, starts.len()))
    }
}
