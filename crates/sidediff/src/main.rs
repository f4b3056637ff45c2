//! sidediff CLI - side-by-side text comparison TUI

mod app;
mod color;
mod config;
mod input;
mod plain;
mod ui;
mod views;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use input::Input;
use ratatui::prelude::*;
use sidediff_core::DiffAlgorithm;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Width used for plain output when the terminal size is unknown
const FALLBACK_WIDTH: usize = 120;

#[derive(Parser, Debug)]
#[command(name = "sidediff")]
#[command(author, version, about = "Side-by-side text comparison")]
struct Args {
    /// Original text (`-` for standard input)
    old: PathBuf,

    /// Modified text (`-` for standard input)
    new: PathBuf,

    /// Print aligned rows to stdout instead of opening the viewer
    #[arg(long, conflicts_with = "json")]
    plain: bool,

    /// Print both panes as JSON
    #[arg(long)]
    json: bool,

    /// Output width for --plain (defaults to the terminal width)
    #[arg(short, long)]
    width: Option<usize>,

    /// Diff algorithm
    #[arg(long, value_enum)]
    algorithm: Option<CliAlgorithm>,

    /// Keep the raw character diff without semantic cleanup
    #[arg(long)]
    no_cleanup: bool,

    /// Hide line numbers
    #[arg(long)]
    no_line_numbers: bool,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliAlgorithm {
    Myers,
    Patience,
    Lcs,
}

impl From<CliAlgorithm> for DiffAlgorithm {
    fn from(algorithm: CliAlgorithm) -> Self {
        match algorithm {
            CliAlgorithm::Myers => DiffAlgorithm::Myers,
            CliAlgorithm::Patience => DiffAlgorithm::Patience,
            CliAlgorithm::Lcs => DiffAlgorithm::Lcs,
        }
    }
}

/// Install the tracing subscriber. The viewer owns the terminal, so it only
/// logs when a file is given; plain and JSON output log to stderr.
fn init_tracing(config: &Config, interactive: bool) -> Result<()> {
    let level = config.log.level.as_deref().unwrap_or("warn");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    match &config.log.file {
        Some(path) => {
            let file = File::create(path)
                .context(format!("Failed to open log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(anyhow::Error::from_boxed)
                .context("Failed to install log subscriber")?;
        }
        None if !interactive => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init()
                .map_err(anyhow::Error::from_boxed)
                .context("Failed to install log subscriber")?;
        }
        None => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load();

    // CLI overrides config
    if let Some(algorithm) = args.algorithm {
        config.diff.algorithm = algorithm.into();
    }
    if args.no_cleanup {
        config.diff.semantic_cleanup = false;
    }
    if args.no_line_numbers {
        config.ui.line_numbers = false;
    }
    if args.log_file.is_some() {
        config.log.file = args.log_file.clone();
    }

    let interactive = !args.plain && !args.json;
    init_tracing(&config, interactive)?;

    let stdin = Path::new("-");
    if args.old == stdin && args.new == stdin {
        anyhow::bail!("Only one side can be read from standard input");
    }

    let old = Input::load(&args.old)?;
    let new = Input::load(&args.new)?;
    tracing::info!(
        old = %old.label(),
        new = %new.label(),
        algorithm = ?config.diff.algorithm,
        "comparing"
    );

    let engine = config.diff.engine();

    if args.json {
        let panes = engine.compare(&old.text, &new.text);
        let json = panes.to_json_pretty().context("Failed to serialize panes")?;
        println!("{json}");
        return Ok(());
    }

    if args.plain {
        let panes = engine.compare(&old.text, &new.text);
        let width = args.width.unwrap_or_else(|| {
            crossterm::terminal::size()
                .map(|(cols, _)| cols as usize)
                .unwrap_or(FALLBACK_WIDTH)
        });
        let out = plain::render_plain(&panes, width, config.ui.line_numbers);
        let mut stdout = io::stdout().lock();
        stdout.write_all(out.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let mut app = App::new(old, new, engine);
    app.show_line_numbers = config.ui.line_numbers;
    app.scroll_step = config.ui.scroll_step.max(1);
    app.theme = config.ui.colors.resolve();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    tracing::debug!(
        hits = app.cache().hits(),
        misses = app.cache().misses(),
        "viewer closed"
    );

    if let Err(err) = result {
        tracing::error!(error = %err, "viewer failed");
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

/// Rows available to the panes
fn viewport_height() -> usize {
    crossterm::terminal::size()
        .map(|(_, rows)| rows.saturating_sub(ui::STATUS_HEIGHT) as usize)
        .unwrap_or(0)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(50);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Mouse(me) => match me.kind {
                    MouseEventKind::ScrollUp => app.scroll_up(),
                    MouseEventKind::ScrollDown => app.scroll_down(),
                    MouseEventKind::ScrollLeft => app.scroll_left(),
                    MouseEventKind::ScrollRight => app.scroll_right(),
                    _ => {}
                },
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Any key clears a stale status message
                    app.status_message = None;
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.should_quit = true;
                        }
                        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.scroll_half_page_down(viewport_height());
                        }
                        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.scroll_half_page_up(viewport_height());
                        }
                        KeyCode::Char('J') | KeyCode::PageDown => {
                            app.scroll_half_page_down(viewport_height());
                        }
                        KeyCode::Char('K') | KeyCode::PageUp => {
                            app.scroll_half_page_up(viewport_height());
                        }
                        KeyCode::Home | KeyCode::Char('g') => app.goto_start(),
                        KeyCode::End | KeyCode::Char('G') => app.goto_end(viewport_height()),
                        KeyCode::Right | KeyCode::Char('l') => app.scroll_right(),
                        KeyCode::Left | KeyCode::Char('h') => app.scroll_left(),
                        KeyCode::Char('0') => app.scroll_to_line_start(),
                        KeyCode::Char('n') => {
                            app.next_change();
                        }
                        KeyCode::Char('N') => {
                            app.prev_change();
                        }
                        KeyCode::Char('r') => app.reload(),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_reports_second_install() {
        let path = std::env::temp_dir().join(format!("sidediff-log-{}.log", std::process::id()));
        let mut config = Config::default();
        config.log.file = Some(path.clone());

        assert!(init_tracing(&config, true).is_ok());
        let err = init_tracing(&config, true).expect_err("subscriber already installed");
        assert!(format!("{err:#}").contains("Failed to install log subscriber"));

        // The viewer without a log file installs nothing
        config.log.file = None;
        assert!(init_tracing(&config, true).is_ok());

        let _ = std::fs::remove_file(&path);
    }
}
