//! `viec` - terminal todo list
//!
//! ```sh
//! viec                        # data in the platform data dir
//! viec --data-dir ./todos     # data somewhere else
//! viec --ephemeral            # nothing touches the disk
//! VIEC_LOG=debug viec --log-file viec.log
//! ```

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tui_dispatch::{process_raw_event, spawn_event_poller, RawEvent};
use viec_tui::{
    logging, reducer, AppAction, AppState, AppStore, Args, Config, SessionStats, TodoUi,
};

/// How often the calendar date is re-read
const TICK_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = logging::init(config.log_file.as_deref()) {
        eprintln!("Warning: logging disabled: {e}");
    }

    // Load before entering TUI mode so errors reach the shell
    let state = match AppState::load(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load todos");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, state, TodoUi::new(config.keybindings)).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Exited with error");
    }
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: AppState,
    mut ui: TodoUi,
) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let mut store = AppStore::new(state, reducer, SessionStats::default());

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let size = terminal.size()?;
    store.dispatch(AppAction::UiTerminalResize(size.width, size.height));

    let mut tick = tokio::time::interval(TICK_INTERVAL);
    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| ui.render(frame, store.state()))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);
                for action in ui.map_event(&event, store.state()) {
                    let _ = action_tx.send(action);
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, AppAction::Quit) {
                    break;
                }
                should_render |= store.dispatch(action).changed;
            }

            _ = tick.tick() => {
                let _ = action_tx.send(AppAction::Tick);
            }
        }
    }

    cancel_token.cancel();
    let stats = store.middleware();
    tracing::info!(
        dispatched = stats.dispatched,
        changed = stats.changed,
        "Session ended"
    );
    Ok(())
}
