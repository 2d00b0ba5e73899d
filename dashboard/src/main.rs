//! Dashboard TUI
//!
//! # Usage
//!
//! ```sh
//! # Run with the default guest user
//! cargo run -p dashboard
//!
//! # Sign in as someone else and fetch the greeting
//! cargo run -p dashboard -- --name Ada --email ada@example.com --server-render
//!
//! # Write logs to a file (RUST_LOG controls the level)
//! RUST_LOG=debug cargo run -p dashboard -- --log-file dashboard.log
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dashboard::config::{DEFAULT_ASSET_BASE, DEFAULT_GREETING_URL};
use dashboard::{
    reducer, Action, AppState, DashboardConfig, DashboardView, ExecutionMode, User, ViewMsg,
};
use dashboard_core::{
    process_raw_event, spawn_input_poller, EventKind, FormBuilder, LoggingMiddleware,
    PollerConfig, RawEvent, StoreWithMiddleware,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Dashboard - user form and image galleries in the terminal
#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "A terminal dashboard with a user form and image galleries")]
struct Args {
    /// Name of the signed-in user
    #[arg(long, short, default_value = "Guest")]
    name: String,

    /// Email of the signed-in user
    #[arg(long, default_value = "guest@example.com")]
    email: String,

    /// Directory prefix of the gallery images
    #[arg(long, default_value = DEFAULT_ASSET_BASE)]
    asset_base: String,

    /// Render as the server would: fetch the greeting on start
    #[arg(long)]
    server_render: bool,

    /// Greeting endpoint (used with --server-render)
    #[arg(long, default_value = DEFAULT_GREETING_URL)]
    greeting_url: String,

    /// Write tracing output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> DashboardConfig {
        DashboardConfig {
            mode: ExecutionMode::from_server_render(self.server_render),
            asset_base: self.asset_base.clone(),
            greeting_url: self.greeting_url.clone(),
            ..DashboardConfig::default()
        }
    }

    fn user(&self) -> User {
        User {
            id: 1,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Install the file logger; without a path nothing is logged
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app and capture result
    let result = run_app(&mut terminal, args.config(), args.user()).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: DashboardConfig,
    user: User,
) -> io::Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (view_tx, mut view_rx) = mpsc::unbounded_channel::<ViewMsg>();
    let cancel_token = CancellationToken::new();

    let mut store = StoreWithMiddleware::new(
        AppState::signed_in(user),
        reducer,
        LoggingMiddleware::new(),
    );

    let mut view =
        DashboardView::new(config, store.handle(action_tx), &FormBuilder::new(), view_tx);
    if let Err(e) = view.initialize() {
        tracing::error!(error = %e, "Dashboard failed to initialize");
    }

    let _input_handle =
        spawn_input_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| view.render(frame, frame.area()))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw) = event_rx.recv() => {
                let event = process_raw_event(raw);
                if event.is_quit() {
                    break;
                }
                if matches!(event, EventKind::Key(_) | EventKind::Resize(..)) {
                    should_render = true;
                }
                for msg in view.handle_event(&event) {
                    should_render |= view.apply(msg);
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, Action::Quit) {
                    break;
                }
                store.dispatch(action);
            }

            Some(msg) = view_rx.recv() => {
                should_render |= view.apply(msg);
            }

            else => break,
        }
    }

    view.teardown();
    cancel_token.cancel();
    Ok(())
}
