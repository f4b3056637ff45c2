//! Sidediff Core - Side-by-side pane builder
//!
//! This library turns an ordered stream of character-level diff operations
//! into two vertically aligned, line-numbered panes that scroll together.

pub mod cache;
pub mod content;
pub mod diff;
pub mod error;
pub mod line;
pub mod pane;

pub use cache::PaneCache;
pub use content::{Content, Side};
pub use diff::{cleanup_semantic, DiffAlgorithm, DiffEngine};
pub use error::PaneError;
pub use line::{DiffLine, DiffSpan, SpanState};
pub use pane::{build_panes, DiffOp, DiffStats, Operation, PaneBuilder, SideBySide};
