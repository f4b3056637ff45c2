//! Loading the two texts being compared

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Where an input text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

/// One side of the comparison
#[derive(Debug, Clone)]
pub struct Input {
    pub source: InputSource,
    pub text: String,
}

impl Input {
    /// Read `path`, where `-` means standard input
    pub fn load(path: &Path) -> Result<Self> {
        if path == Path::new("-") {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            return Ok(Self {
                source: InputSource::Stdin,
                text,
            });
        }
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read: {}", path.display()))?;
        Ok(Self {
            source: InputSource::File(path.to_path_buf()),
            text,
        })
    }

    #[cfg(test)]
    pub fn from_text(path: &str, text: &str) -> Self {
        Self {
            source: InputSource::File(PathBuf::from(path)),
            text: text.to_string(),
        }
    }

    /// Display name for status lines
    pub fn label(&self) -> String {
        match &self.source {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }

    /// Re-read a file input from disk. Returns true if the text changed.
    /// Standard input cannot be re-read and is left as is.
    pub fn reload(&mut self) -> Result<bool> {
        let InputSource::File(path) = &self.source else {
            return Ok(false);
        };
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read: {}", path.display()))?;
        let changed = text != self.text;
        self.text = text;
        Ok(changed)
    }
}
