//! Error types for the pane builder

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaneError {
    #[error("Unknown diff operation code: {0} (expected -1, 0 or 1)")]
    UnknownOperation(i8),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
