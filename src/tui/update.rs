//! Command handling: (App, Command) → orchestrator calls.
//!
//! Everything here goes through the orchestrator's public surface, so the
//! demo exercises exactly what an embedding application would use.

use futures::FutureExt;
use tracing::info;

use crate::handler::TextRequest;
use crate::orchestrator::Host;
use crate::types::{Mode, ShowArgs};

use super::state::{App, Command};

/// Apply one command to the app.
pub fn apply(app: &mut App, command: Command) {
    match command {
        Command::Switch(mode) => switch(app, mode),
        Command::TogglePreserve => {
            app.preserve = !app.preserve;
            let policy = if app.preserve { "preserving" } else { "clearing" };
            app.board.borrow_mut().status = format!("Switches are now {}", policy);
        }
        Command::ToggleAutomated => {
            let automated = !app.ui.host().automated();
            app.ui.host_mut().set_automated(automated);
            app.board.borrow_mut().status = format!("Automated mode {}", on_off(automated));
        }
        Command::CursorUp => {
            let cursor = app.ui.cursor().saturating_sub(1);
            app.ui.set_cursor(cursor);
        }
        Command::CursorDown => {
            let cursor = app.ui.cursor() + 1;
            app.ui.set_cursor(cursor);
        }
        Command::Input(code) => {
            if !app.ui.process_input(code) {
                app.board.borrow_mut().status = String::from("Input dropped during transition");
            }
        }
        Command::ShowText => {
            let text = format!("Hello from {}", app.ui.mode());
            app.ui.show_text(TextRequest::new(text).prompt(true));
        }
        Command::ClearText => app.ui.clear_text(),
        Command::Quit => app.should_quit = true,
    }
}

fn switch(app: &mut App, mode: Mode) {
    let mut args = ShowArgs::new().with(format!("from {}", app.ui.mode()));
    if app.preserve {
        args.push(format!("{} kept as it was", app.ui.mode()));
    }
    let completion = if app.preserve {
        app.ui.switch_mode_preserving(mode, args)
    } else {
        app.ui.switch_mode(mode, args)
    };
    app.pending.push((mode, completion));
    poll_pending(app);
}

/// Report switches that have completed since the last poll.
pub fn poll_pending(app: &mut App) {
    let mut still_pending = Vec::with_capacity(app.pending.len());
    for (mode, mut completion) in app.pending.drain(..) {
        match (&mut completion).now_or_never() {
            Some(Ok(())) => {
                info!(%mode, "Switch complete");
                app.board.borrow_mut().status = format!("Now showing {}", mode);
            }
            Some(Err(err)) => {
                app.board.borrow_mut().status = err.to_string();
                app.ui.play_error();
            }
            None => still_pending.push((mode, completion)),
        }
    }
    app.pending = still_pending;
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

// ============================================================================
// TESTS
// ============================================================================
