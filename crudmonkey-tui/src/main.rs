//! crudmonkey entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crudmonkey_storage::JsonFileStore;
use crudmonkey_tui::config::TuiConfig;
use crudmonkey_tui::error::TuiError;
use crudmonkey_tui::events::TuiEvent;
use crudmonkey_tui::keys::map_key;
use crudmonkey_tui::logging::init_logging;
use crudmonkey_tui::models::{register_demo_resources, seed_demo_data_or_notify};
use crudmonkey_tui::persistence;
use crudmonkey_tui::state::App;
use crudmonkey_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    init_logging(&config)?;

    let store = JsonFileStore::open(&config.store_path)?.with_constraints(config.unique.clone());

    let mut app = App::new(Arc::new(store));
    if config.seed_demo_data {
        seed_demo_data_or_notify(&mut app);
    }
    register_demo_resources(&mut app)?;

    match persistence::load(&config.persistence_path) {
        Ok(Some(state)) => {
            app.restore(&state);
        }
        Ok(None) => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable UI state"),
    }

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => handle_event(&mut app, event),
        }

        if app.should_quit {
            break;
        }
    }

    if let Err(err) = persistence::save(&config.persistence_path, &app.persisted_state()) {
        tracing::warn!(error = %err, "Failed to save UI state");
    }
    tracing::info!("Exiting");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

fn handle_event(app: &mut App, event: TuiEvent) {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(key, app.input_mode()) {
                app.handle_action(action);
            }
        }
        TuiEvent::Resize { .. } => {}
    }
}
