//! `Reading Companion` - terminal test bench for the reading-reference parser.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{io, panic, sync::Mutex, time::Duration};
use tracing_subscriber::EnvFilter;

use reading_companion::app::App;
use reading_companion::config::Config;
use reading_companion::constants::bench::{LOG_FILE, POLL_INTERVAL_MS};
use reading_companion::ui;

// Helper function to ensure the terminal is cleaned up on exit
fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Log to a file in the data dir so the terminal stays clean. Logging is
/// skipped when no data dir is available.
fn init_logging() -> Result<()> {
    let Some(dir) = dirs::data_dir().map(|d| d.join(env!("CARGO_PKG_NAME"))) else {
        return Ok(());
    };
    fs_err::create_dir_all(&dir)?;
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging().context("Failed to set up logging")?;

    let config = Config::load()?;
    let app = App::new(config).context("Failed to load book catalogs")?;

    // Setup better panic handling that cleans up terminal first
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // First disable raw mode
        let _ = disable_raw_mode();
        // Try to restore terminal to normal state
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen, DisableMouseCapture);
        // Call the original panic handler
        original_hook(panic_info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    if let Err(e) = cleanup_terminal(&mut terminal) {
        eprintln!("Error cleaning up terminal: {e:?}");
    }

    if let Err(err) = res {
        tracing::error!("Test bench failed: {err:?}");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            match event::read()? {
                event::Event::Key(key) if key.kind == event::KeyEventKind::Press => app.handle_key(key),
                event::Event::Paste(text) if !app.is_command_mode => app.input.push_str(text.trim_end()),
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
