//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{generator::Algorithm, App};

/// Input polling timeout while no run is in progress.
const IDLE_POLL_MS: u64 = 100;

/// Handles input events and advances the active run.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. While a run is in
/// progress the poll only waits until the next frame is due, so input never holds back the
/// animation; otherwise it uses a fixed timeout to avoid spinning.
///
/// # Errors
///
/// This function may return errors from polling or reading terminal events.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = if app.is_running() {
        app.animator.until_next_frame()
    } else {
        Duration::from_millis(IDLE_POLL_MS)
    };

    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    let _ = app.advance();

    Ok(())
}

/// Handles a single key press.
///
/// - `q` or `Esc` quits
/// - `d` starts a depth-first run
/// - `r` starts a recursive division run
/// - `f` finishes the active run instantly
/// - `x` aborts the active run
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        KeyCode::Char('d') => {
            let _ = app.start(Algorithm::DepthFirst);
        }
        KeyCode::Char('r') => {
            let _ = app.start(Algorithm::Division);
        }
        KeyCode::Char('f') => app.finish(),
        KeyCode::Char('x') => app.abort(),
        _ => {}
    }
}
