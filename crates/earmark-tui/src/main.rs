//! earmark - a terminal client for browsing audio collections and their
//! transcripts.
//!
//! Access is gated by a bearer token obtained from the login screen. The
//! token survives restarts, and a rejected token sends the user back to the
//! login screen.

mod app;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use earmark_core::api::{ApiClient, HttpClient};
use earmark_core::auth::{FileStore, TokenStore};
use earmark_core::config::Config;
use earmark_core::router::RouteName;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Prefix of the daily log files in the cache directory
const LOG_FILE_PREFIX: &str = "earmark.log";

/// Initialize the tracing subscriber for logging.
///
/// Logs go to a daily file so they never draw over the terminal UI. Use the
/// RUST_LOG env var to control the level (e.g., RUST_LOG=debug). The returned
/// guard flushes pending lines when dropped.
fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let log_dir = Config::cache_dir().ok()?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--collections" {
        return dump_collections().await;
    }

    info!("earmark starting");

    // Create app before touching the terminal so setup errors print normally
    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The guard decides between home and login
    app.navigate(RouteName::Home);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("earmark shutting down");
    Ok(())
}

/// Print the collections visible with the stored token to stdout as JSON
async fn dump_collections() -> Result<()> {
    let config = Config::load()?;
    let tokens = Arc::new(TokenStore::load(Box::new(FileStore::default_location()?)));

    if !tokens.is_authenticated() {
        return Err(anyhow::anyhow!(
            "No saved token. Please run the app and login first."
        ));
    }

    let on_unauthorized = || warn!("Stored token was rejected, log in again from the app");
    let http = HttpClient::new(tokens, Arc::new(on_unauthorized))?;
    let api = ApiClient::new(http, &config.base_url())?;

    eprintln!("Fetching collections from {}...", api.base_url());
    let collections = api.collections().await?;
    println!("{}", serde_json::to_string_pretty(&collections)?);
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Apply finished fetches and queued navigation
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
