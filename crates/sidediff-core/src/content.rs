//! Per-side line accumulator and numbering pass

use crate::line::{DiffLine, DiffSpan, SpanState};
use serde::{Deserialize, Serialize};

/// Which pane a `Content` belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left pane, the first text
    Original,
    /// Right pane, the second text
    Modified,
}

/// Ordered lines of one pane. The last line is the current line and is the
/// only one that receives new spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    side: Side,
    lines: Vec<DiffLine>,
}

impl Content {
    /// Create a pane holding a single empty line
    pub fn new(side: Side) -> Self {
        Self {
            side,
            lines: vec![DiffLine::new()],
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false: a pane starts with one line and only grows
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The current line
    pub fn last(&self) -> &DiffLine {
        // `lines` starts non-empty and is append-only
        &self.lines[self.lines.len() - 1]
    }

    fn last_mut(&mut self) -> &mut DiffLine {
        let idx = self.lines.len() - 1;
        &mut self.lines[idx]
    }

    /// Append a span to the current line
    pub fn push_span(&mut self, span: DiffSpan) {
        self.last_mut().add_span(span);
    }

    /// Finalize the current line and start a new one.
    ///
    /// A side that does not advance a source line at this boundary gets a
    /// spacer newline, so its row still renders full width next to the
    /// other pane.
    pub fn add_line(&mut self, show_line_number: bool) {
        let current = self.last_mut();
        if !show_line_number {
            current.add_span(DiffSpan::spacer());
        }
        current.set_show_next_line_number(show_line_number);
        self.lines.push(DiffLine::new());
    }

    /// Assign visible line numbers in one forward pass.
    ///
    /// A line is numbered when the line before it ended a source line on
    /// this side. The first line is always numbered.
    pub fn compute_line_numbers(&mut self) {
        let mut line_number = 1;
        let mut carry = true;
        for line in &mut self.lines {
            if carry {
                line.set_line_number(line_number);
                line_number += 1;
            }
            carry = line.show_next_line_number().unwrap_or(false);
        }
    }

    /// Number of lines that received a visible line number
    pub fn numbered_line_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.line_number().is_some())
            .count()
    }

    /// Highest assigned line number, used to size gutters
    pub fn max_line_number(&self) -> Option<usize> {
        self.lines.iter().rev().find_map(DiffLine::line_number)
    }

    /// Rebuild this side's input text from its non-spacer spans
    pub fn source_text(&self) -> String {
        self.lines
            .iter()
            .flat_map(DiffLine::spans)
            .filter(|span| span.state() != SpanState::Spacer)
            .map(DiffSpan::content)
            .collect()
    }
}
