//! Streaming construction of the two aligned panes
//!
//! The builder consumes the diff operations once, in document order. Every
//! newline it crosses advances BOTH panes by one row, so the two line lists
//! always have the same length and scroll in lock-step.

use crate::content::{Content, Side};
use crate::error::PaneError;
use crate::line::{DiffLine, DiffSpan, SpanState};
use serde::{Deserialize, Serialize};

/// Kind of a diff operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Equal,
    Insert,
    Delete,
}

impl Operation {
    /// Integer code: equal = 0, insert = 1, delete = -1
    pub fn code(self) -> i8 {
        match self {
            Operation::Equal => 0,
            Operation::Insert => 1,
            Operation::Delete => -1,
        }
    }
}

impl TryFrom<i8> for Operation {
    type Error = PaneError;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Operation::Equal),
            1 => Ok(Operation::Insert),
            -1 => Ok(Operation::Delete),
            other => Err(PaneError::UnknownOperation(other)),
        }
    }
}

/// One element of a diff: an operation and the text it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    pub operation: Operation,
    pub text: String,
}

impl DiffOp {
    pub fn new(operation: Operation, text: impl Into<String>) -> Self {
        Self {
            operation,
            text: text.into(),
        }
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Operation::Equal, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(Operation::Insert, text)
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(Operation::Delete, text)
    }
}

/// Drives the original and modified panes in lock-step
#[derive(Debug, Clone)]
pub struct PaneBuilder {
    original: Content,
    modified: Content,
    operations: usize,
}

impl Default for PaneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PaneBuilder {
    pub fn new() -> Self {
        Self {
            original: Content::new(Side::Original),
            modified: Content::new(Side::Modified),
            operations: 0,
        }
    }

    /// Feed one operation
    pub fn push(&mut self, operation: Operation, text: &str) {
        self.operations += 1;
        for segment in text.split_inclusive('\n') {
            match operation {
                Operation::Equal => {
                    self.original
                        .push_span(DiffSpan::new(segment, SpanState::Unchanged));
                    self.modified
                        .push_span(DiffSpan::new(segment, SpanState::Unchanged));
                }
                Operation::Insert => {
                    self.modified
                        .push_span(DiffSpan::new(segment, SpanState::Added));
                }
                Operation::Delete => {
                    self.original
                        .push_span(DiffSpan::new(segment, SpanState::Removed));
                }
            }

            if segment.ends_with('\n') {
                let (show_original, show_modified) = match operation {
                    Operation::Equal => (true, true),
                    Operation::Insert => (false, true),
                    Operation::Delete => (true, false),
                };
                self.original.add_line(show_original);
                self.modified.add_line(show_modified);
                debug_assert_eq!(
                    self.original.len(),
                    self.modified.len(),
                    "panes advance together"
                );
            }
        }
    }

    /// Feed one `DiffOp`
    pub fn push_op(&mut self, op: &DiffOp) {
        self.push(op.operation, &op.text);
    }

    /// Current row count; equal on both sides at every point
    pub fn row_count(&self) -> usize {
        self.original.len()
    }

    /// Number the lines of both panes and hand them over
    pub fn finish(mut self) -> SideBySide {
        self.original.compute_line_numbers();
        self.modified.compute_line_numbers();
        tracing::debug!(
            operations = self.operations,
            rows = self.original.len(),
            original_lines = self.original.numbered_line_count(),
            modified_lines = self.modified.numbered_line_count(),
            "built side-by-side panes"
        );
        SideBySide {
            original: self.original,
            modified: self.modified,
        }
    }
}

/// Build both panes from an operation sequence in one pass
pub fn build_panes<I, S>(operations: I) -> SideBySide
where
    I: IntoIterator<Item = (Operation, S)>,
    S: AsRef<str>,
{
    let mut builder = PaneBuilder::new();
    for (operation, text) in operations {
        builder.push(operation, text.as_ref());
    }
    builder.finish()
}

/// Change totals for a rendered comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Added characters
    pub insertions: usize,
    /// Removed characters
    pub deletions: usize,
    /// Rows with an added or removed span on either side
    pub changed_rows: usize,
}

/// The finished, numbered pair of panes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBySide {
    original: Content,
    modified: Content,
}

impl SideBySide {
    /// Left pane
    pub fn original(&self) -> &Content {
        &self.original
    }

    /// Right pane
    pub fn modified(&self) -> &Content {
        &self.modified
    }

    pub fn content(&self, side: Side) -> &Content {
        match side {
            Side::Original => &self.original,
            Side::Modified => &self.modified,
        }
    }

    pub fn row_count(&self) -> usize {
        self.original.len()
    }

    /// Aligned rows: the left and right line at each index
    pub fn rows(&self) -> impl Iterator<Item = (&DiffLine, &DiffLine)> + '_ {
        self.original.lines().iter().zip(self.modified.lines())
    }

    pub fn row(&self, idx: usize) -> Option<(&DiffLine, &DiffLine)> {
        Some((self.original.lines().get(idx)?, self.modified.lines().get(idx)?))
    }

    fn is_changed_row(&self, idx: usize) -> bool {
        self.row(idx)
            .is_some_and(|(left, right)| left.has_changes() || right.has_changes())
    }

    /// True when both sides hold identical text
    pub fn is_identical(&self) -> bool {
        !(0..self.row_count()).any(|idx| self.is_changed_row(idx))
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for (left, right) in self.rows() {
            for span in left.spans().iter().chain(right.spans()) {
                let chars = span.content().chars().count();
                match span.state() {
                    SpanState::Added => stats.insertions += chars,
                    SpanState::Removed => stats.deletions += chars,
                    SpanState::Unchanged | SpanState::Spacer => {}
                }
            }
            if left.has_changes() || right.has_changes() {
                stats.changed_rows += 1;
            }
        }
        stats
    }

    /// Rows that start a block of consecutive changed rows
    pub fn change_starts(&self) -> Vec<usize> {
        (0..self.row_count())
            .filter(|&idx| self.is_changed_row(idx) && (idx == 0 || !self.is_changed_row(idx - 1)))
            .collect()
    }

    /// First change block starting after `from`
    pub fn next_change_row(&self, from: usize) -> Option<usize> {
        self.change_starts().into_iter().find(|&idx| idx > from)
    }

    /// Closest change block starting before `from`
    pub fn prev_change_row(&self, from: usize) -> Option<usize> {
        self.change_starts().into_iter().rev().find(|&idx| idx < from)
    }

    pub fn to_json_pretty(&self) -> Result<String, PaneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
