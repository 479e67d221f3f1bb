//! brainstorm-buddy - guided app idea questionnaire
//!
//! Terminal UI that walks through eight questions about an app idea, then
//! summarizes it, suggests next steps, and keeps saved ideas in a local store.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use buddy_core::share::FileShareTarget;
use buddy_core::{
    preferences, quotes, Config, Controller, MemoryStore, SessionRepository, SqliteStore,
    TemplateAssistant,
};
use chrono::{Local, TimeZone};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{App, Store};

#[derive(Parser)]
#[command(name = "brainstorm-buddy")]
#[command(about = "Brainstorm an app idea one question at a time")]
#[command(version)]
struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store file to use instead of the configured one
    #[arg(long, conflicts_with = "memory")]
    store: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    memory: bool,

    /// Print saved ideas, newest first, and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        buddy_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("brainstorm-buddy starting up");

    let store = open_store(&args, &config)?;
    let repo = SessionRepository::open(store).context("failed to read saved sessions")?;

    if args.list {
        print_sessions(&repo);
        return Ok(());
    }

    let dark_mode = preferences::dark_mode(repo.store(), config.ui.prefer_dark)
        .context("failed to read theme preference")?;
    let quote = quotes::pick(Local::now().timestamp_millis().unsigned_abs());
    let share_target = FileShareTarget::new(Config::share_dir());
    let controller = Controller::new(repo, TemplateAssistant, &config.assistant);
    let mut app = App::new(controller, dark_mode, quote, share_target);

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("brainstorm-buddy shutting down");

    result
}

/// Open the store selected by the command line and config.
fn open_store(args: &Args, config: &Config) -> Result<Store> {
    if args.memory {
        tracing::info!("Using in-memory store");
        return Ok(Box::new(MemoryStore::new()));
    }

    let path = args.store.clone().unwrap_or_else(|| config.store_path());
    tracing::info!(path = %path.display(), "Opening store");

    let store = SqliteStore::open(&path).context("failed to open store")?;
    store.migrate().context("failed to run store migrations")?;
    Ok(Box::new(store))
}

fn print_sessions(repo: &SessionRepository<Store>) {
    let sessions = repo.recent(repo.len());
    if sessions.is_empty() {
        println!("No saved ideas yet. Start brainstorming!");
        return;
    }

    println!("{} saved idea(s):", sessions.len());
    for session in sessions {
        let saved = Local
            .timestamp_millis_opt(session.timestamp)
            .single()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown date".to_string());
        println!("  {}  {}  [{}]", saved, session.title, session.id);
        println!("      {}", session.preview().headline);
    }
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Deliver deferred suggestions and replies
        app.tick();

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
