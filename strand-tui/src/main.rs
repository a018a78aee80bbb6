//! Strand - a keyword-driven interactive fiction game for the terminal.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use once_cell::sync::Lazy;
use ratatui::prelude::*;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

mod app;
mod audio;
mod events;
mod ui;

use app::{AppFlow, AppState};
use events::{handle_event, EventResult};
use ui::render;

/// Shared tokio runtime hosting the reveal tasks. The render loop itself
/// stays synchronous.
static RUNTIME: Lazy<Runtime> =
    Lazy::new(|| Runtime::new().expect("failed to create tokio runtime"));

fn main() -> io::Result<()> {
    init_logging()?;

    // Reveal schedulers spawn their workers onto the shared runtime.
    let _runtime = RUNTIME.enter();

    let assets_root = assets_root();
    let mut app = match AppState::new(&assets_root) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("failed to load scenes from {}: {e}", assets_root.display());
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
    if let Some(diagnostic) = app.fatal.take() {
        eprintln!("{diagnostic}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> io::Result<()> {
    let tick_rate = Duration::from_millis(50);

    loop {
        terminal.draw(|frame| render(frame, app))?;

        // Poll with a timeout so an active reveal keeps animating.
        if event::poll(tick_rate)? {
            let event = event::read()?;
            match handle_event(app, event) {
                EventResult::Quit => break,
                EventResult::Continue | EventResult::NeedsRedraw => {}
            }
        }

        if matches!(app.flow, AppFlow::Quit) {
            break;
        }
    }

    Ok(())
}

/// Logs go to a file so the alternate screen stays clean.
fn init_logging() -> io::Result<()> {
    let log_file = std::fs::File::create("strand.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn assets_root() -> PathBuf {
    std::env::var_os("STRAND_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}
