//! Styled spans and the lines that hold them

use serde::{Deserialize, Serialize};

/// Classification of a span, mapped to a visual style by presenters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanState {
    /// Text present only in the modified side
    Added,
    /// Text present only in the original side
    Removed,
    /// Text shared by both sides
    Unchanged,
    /// Filler that keeps the two panes vertically aligned
    Spacer,
}

impl SpanState {
    /// True for added or removed text
    pub fn is_change(self) -> bool {
        matches!(self, SpanState::Added | SpanState::Removed)
    }
}

/// An atomic styled text fragment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSpan {
    content: String,
    state: SpanState,
}

impl DiffSpan {
    pub fn new(content: impl Into<String>, state: SpanState) -> Self {
        Self {
            content: content.into(),
            state,
        }
    }

    /// The newline span appended to a row that does not advance its side
    pub fn spacer() -> Self {
        Self::new("\n", SpanState::Spacer)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn state(&self) -> SpanState {
        self.state
    }

    pub fn ends_with_newline(&self) -> bool {
        self.content.ends_with('\n')
    }

    /// Content without its trailing newline
    pub fn visible_text(&self) -> &str {
        self.content.strip_suffix('\n').unwrap_or(&self.content)
    }
}

/// One rendered row of a pane
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    spans: Vec<DiffSpan>,
    /// Whether the next line on this side starts a new source line.
    /// `None` until the line is finalized by `Content::add_line`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    show_next_line_number: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line_number: Option<usize>,
}

impl DiffLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_span(&mut self, span: DiffSpan) {
        self.spans.push(span);
    }

    pub fn last_span(&self) -> Option<&DiffSpan> {
        self.spans.last()
    }

    pub fn spans(&self) -> &[DiffSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    pub fn show_next_line_number(&self) -> Option<bool> {
        self.show_next_line_number
    }

    /// True when the last span ends in a newline; presenters extend that
    /// span's highlight to the pane edge.
    pub fn ends_with_newline(&self) -> bool {
        self.last_span().is_some_and(DiffSpan::ends_with_newline)
    }

    /// True when the row holds nothing but spacer spans
    pub fn is_filler(&self) -> bool {
        !self.spans.is_empty() && self.spans.iter().all(|s| s.state == SpanState::Spacer)
    }

    /// True when any span is added or removed text
    pub fn has_changes(&self) -> bool {
        self.spans.iter().any(|s| s.state.is_change())
    }

    /// Visible text of the row, newlines stripped
    pub fn text(&self) -> String {
        self.spans.iter().map(DiffSpan::visible_text).collect()
    }

    pub(crate) fn set_show_next_line_number(&mut self, show: bool) {
        debug_assert!(
            self.show_next_line_number.is_none(),
            "showNextLineNumber is set once per line"
        );
        self.show_next_line_number = Some(show);
    }

    pub(crate) fn set_line_number(&mut self, number: usize) {
        self.line_number = Some(number);
    }
}
