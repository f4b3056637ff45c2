//! Configuration file support for sidediff
//!
//! Config file location: `~/.config/sidediff/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! [ui]
//! line_numbers = true
//! scroll_step = 1
//!
//! [ui.colors]
//! added = "#A3BE8C"
//! removed = "#BF616A"
//! spacer = "#3B4252"
//! line_number = "#616E88"
//!
//! [diff]
//! algorithm = "myers"
//! semantic_cleanup = true
//! timeout_ms = 2000
//!
//! [log]
//! file = "/tmp/sidediff.log"
//! level = "info"
//! ```

use crate::color::{self, Rgb};
use ratatui::style::Color;
use serde::Deserialize;
use sidediff_core::{DiffAlgorithm, DiffEngine};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Theme Configuration
// ============================================================================

/// Hex color overrides for diff states
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub added: Option<String>,
    pub removed: Option<String>,
    pub spacer: Option<String>,
    pub line_number: Option<String>,
    pub border: Option<String>,
}

/// Resolved theme: ratatui colors ready to use
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub added_bg: Color,
    pub added_fg: Color,
    pub removed_bg: Color,
    pub removed_fg: Color,
    pub spacer: Color,
    pub line_number: Color,
    pub border: Color,
    pub status_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let added = Rgb::new(0xA3, 0xBE, 0x8C);
        let removed = Rgb::new(0xBF, 0x61, 0x6A);
        Self {
            text: Color::Reset,
            added_bg: added.darken(0.7).into(),
            added_fg: added.into(),
            removed_bg: removed.darken(0.7).into(),
            removed_fg: removed.into(),
            spacer: Rgb::new(0x3B, 0x42, 0x52).into(),
            line_number: Rgb::new(0x61, 0x6E, 0x88).into(),
            border: Color::DarkGray,
            status_bg: Rgb::new(0x2E, 0x34, 0x40).into(),
        }
    }
}

impl ColorsConfig {
    /// Resolve configured colors over the default theme.
    /// Invalid hex values keep the default and log a warning.
    pub fn resolve(&self) -> Theme {
        let mut theme = Theme::default();
        if let Some(added) = parse_color("added", self.added.as_deref()) {
            theme.added_fg = added.into();
            theme.added_bg = added.darken(0.7).into();
        }
        if let Some(removed) = parse_color("removed", self.removed.as_deref()) {
            theme.removed_fg = removed.into();
            theme.removed_bg = removed.darken(0.7).into();
        }
        if let Some(spacer) = parse_color("spacer", self.spacer.as_deref()) {
            theme.spacer = spacer.into();
        }
        if let Some(line_number) = parse_color("line_number", self.line_number.as_deref()) {
            theme.line_number = line_number.into();
        }
        if let Some(border) = parse_color("border", self.border.as_deref()) {
            theme.border = border.into();
        }
        theme
    }
}

fn parse_color(key: &str, value: Option<&str>) -> Option<Rgb> {
    let value = value?;
    match color::parse_hex(value) {
        Ok(rgb) => Some(rgb),
        Err(err) => {
            tracing::warn!(key, value, %err, "ignoring invalid color");
            None
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// UI configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Show line number gutters
    pub line_numbers: bool,
    /// Rows moved per scroll step
    pub scroll_step: usize,
    /// Color overrides
    pub colors: ColorsConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            scroll_step: 1,
            colors: ColorsConfig::default(),
        }
    }
}

/// Diff engine configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub algorithm: DiffAlgorithm,
    pub semantic_cleanup: bool,
    /// Give up on an optimal diff after this many milliseconds (0 = never)
    pub timeout_ms: u64,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            algorithm: DiffAlgorithm::Myers,
            semantic_cleanup: true,
            timeout_ms: 2000,
        }
    }
}

impl DiffConfig {
    pub fn engine(&self) -> DiffEngine {
        let engine = DiffEngine::new()
            .with_algorithm(self.algorithm)
            .with_semantic_cleanup(self.semantic_cleanup);
        if self.timeout_ms > 0 {
            engine.with_timeout(Duration::from_millis(self.timeout_ms))
        } else {
            engine
        }
    }
}

/// Logging configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; the TUI never logs to the terminal
    pub file: Option<PathBuf>,
    /// Filter directive used when RUST_LOG is unset (e.g. "info")
    pub level: Option<String>,
}

/// Root configuration
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub diff: DiffConfig,
    pub log: LogConfig,
}

impl Config {
    /// Get all possible config file paths in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG_CONFIG_HOME (if set)
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("sidediff").join("config.toml"));
        }

        // 2. ~/.config/sidediff/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("sidediff").join("config.toml"));
        }

        // 3. Platform-specific config dir (~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("sidediff").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }

    /// Get the first existing config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load config from XDG config path
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    /// Parse config text, falling back to defaults on error
    pub fn parse(content: &str) -> Self {
        toml::from_str(content)
            .map_err(|e| {
                eprintln!("Warning: Failed to parse config: {}", e);
                e
            })
            .unwrap_or_default()
    }
}
