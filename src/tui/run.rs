//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with terminal side effects. It wires the
//! orchestrator and the pure layers (update, view) to the real terminal via
//! crossterm and ratatui.
//!
//! Architecture: a key reader thread feeds an mpsc channel. The event loop
//! waits on the channel for at most one frame, then advances the
//! orchestrator by the real elapsed time. Transitions therefore play even
//! when no key is pressed.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::types::Mode;

use super::build_app;
use super::state::{AppEvent, Command, CODE_CANCEL, CODE_CONFIRM};
use super::update::{apply, poll_pending};
use super::view::render;

/// Target frame interval (~60 fps).
const FRAME: Duration = Duration::from_millis(16);

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a host command.
///
/// Returns None for keys that don't map to any command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        // Mode selection: 1 = Message ... 9 = Starter Select
        KeyCode::Char(c @ '1'..='9') => {
            Mode::from_index((c as u8 - b'1') as usize).map(Command::Switch)
        }
        KeyCode::Tab => Some(Command::TogglePreserve),
        KeyCode::Char('a') => Some(Command::ToggleAutomated),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Command::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::CursorDown),

        // Input codes for the active screen
        KeyCode::Enter => Some(Command::Input(CODE_CONFIRM)),
        KeyCode::Esc | KeyCode::Backspace => Some(Command::Input(CODE_CANCEL)),

        // Text
        KeyCode::Char('t') => Some(Command::ShowText),
        KeyCode::Char('c') => Some(Command::ClearText),

        KeyCode::Char('q') => Some(Command::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore releases, mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the demo until the user quits.
pub fn run(config: &UiConfig) -> io::Result<()> {
    let mut app = build_app(config).map_err(io::Error::other)?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    info!(automated = config.automated, "Demo started");

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx);

    let mut last_frame = Instant::now();
    loop {
        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        match rx.recv_timeout(FRAME) {
            Ok(AppEvent::Key(key)) => {
                if let Some(command) = map_key(key) {
                    debug!(?command, "Key command");
                    apply(&mut app, command);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break, // key reader gone
        }

        let now = Instant::now();
        app.ui.tick(now - last_frame);
        last_frame = now;
        poll_pending(&mut app);
    }

    restore_terminal()?;
    info!("Demo stopped");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Command::Quit));
    }

    #[test]
    fn plain_c_clears_text() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Command::ClearText));
    }

    #[test]
    fn digits_select_modes_in_order() {
        for (i, mode) in Mode::ALL.iter().enumerate() {
            let digit = (b'1' + i as u8) as char;
            let key = KeyEvent::new(KeyCode::Char(digit), KeyModifiers::NONE);
            assert_eq!(map_key(key), Some(Command::Switch(*mode)));
        }
    }

    #[test]
    fn zero_is_unmapped() {
        let key = KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE);
        assert_eq!(map_key(key), None);
    }

    #[test]
    fn vim_and_arrow_keys_move_cursor() {
        for (code, expected) in [
            (KeyCode::Char('j'), Command::CursorDown),
            (KeyCode::Down, Command::CursorDown),
            (KeyCode::Char('k'), Command::CursorUp),
            (KeyCode::Up, Command::CursorUp),
        ] {
            assert_eq!(map_key(KeyEvent::new(code, KeyModifiers::NONE)), Some(expected));
        }
    }

    #[test]
    fn enter_and_esc_send_input_codes() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(map_key(enter), Some(Command::Input(CODE_CONFIRM)));
        assert_eq!(map_key(esc), Some(Command::Input(CODE_CANCEL)));
    }

    #[test]
    fn tab_toggles_preserve() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Command::TogglePreserve));
    }

    #[test]
    fn unmapped_key_returns_none() {
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(map_key(key), None);
    }
}
