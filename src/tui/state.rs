//! Demo host state: what the screens publish and what the keys mean.
//!
//! Screens are owned by the orchestrator, so they publish what they want
//! drawn into a shared [`Board`]. The rendering layer reads the board and
//! the orchestrator; it never talks to a screen directly.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::KeyEvent;

use crate::completion::SwitchCompletion;
use crate::orchestrator::{Host, Orchestrator};
use crate::types::{InputCode, Mode, SoundCue};

// ============================================================================
// INPUT CODES
// ============================================================================

/// Input code sent for Enter.
pub const CODE_CONFIRM: InputCode = InputCode(0);

/// Input code sent for Esc / Backspace.
pub const CODE_CANCEL: InputCode = InputCode(1);

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
}

// ============================================================================
// BOARD
// ============================================================================

/// Per-screen display state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panel {
    /// Cursor row.
    pub cursor: usize,
    /// Label passed in through the switch arguments.
    pub origin: Option<String>,
    /// Last confirmed option or text shown on this screen.
    pub note: Option<String>,
}

/// Shared message box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBox {
    pub text: String,
    /// Awaiting input.
    pub prompt: bool,
}

/// Everything the screens publish for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub panels: Vec<Panel>,
    pub message: MessageBox,
    /// Status line, e.g. the outcome of the last switch.
    pub status: String,
    pub last_sound: Option<SoundCue>,
    pub sounds_played: usize,
}

impl Board {
    pub fn new() -> Self {
        Board {
            panels: vec![Panel::default(); Mode::COUNT],
            message: MessageBox::default(),
            status: String::new(),
            last_sound: None,
            sounds_played: 0,
        }
    }

    pub fn panel(&self, mode: Mode) -> &Panel {
        &self.panels[mode.index()]
    }

    pub fn panel_mut(&mut self, mode: Mode) -> &mut Panel {
        &mut self.panels[mode.index()]
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

pub type SharedBoard = Rc<RefCell<Board>>;

// ============================================================================
// HOST
// ============================================================================

/// Terminal host: sound cues become a status indicator.
#[derive(Debug)]
pub struct TerminalHost {
    board: SharedBoard,
    automated: bool,
}

impl TerminalHost {
    pub fn new(board: SharedBoard, automated: bool) -> Self {
        TerminalHost { board, automated }
    }

    pub fn set_automated(&mut self, automated: bool) {
        self.automated = automated;
    }
}

impl Host for TerminalHost {
    fn play_sound(&mut self, cue: SoundCue) {
        tracing::debug!(cue = cue.id(), "Playing sound");
        let mut board = self.board.borrow_mut();
        board.last_sound = Some(cue);
        board.sounds_played += 1;
    }

    fn automated(&self) -> bool {
        self.automated
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Semantic host command, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch to a mode (clearing or preserving, per the current policy).
    Switch(Mode),
    /// Toggle between clearing and preserving switches.
    TogglePreserve,
    /// Toggle automated mode (no transition animations).
    ToggleAutomated,
    CursorUp,
    CursorDown,
    /// Send an input code to the active screen.
    Input(InputCode),
    /// Show a sample message through the text router.
    ShowText,
    ClearText,
    Quit,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level demo model.
pub struct App {
    pub ui: Orchestrator<TerminalHost>,
    pub board: SharedBoard,
    /// Use preserving switches instead of clearing ones.
    pub preserve: bool,
    /// Switches whose completion has not been observed yet.
    pub pending: Vec<(Mode, SwitchCompletion)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(ui: Orchestrator<TerminalHost>, board: SharedBoard) -> Self {
        App {
            ui,
            board,
            preserve: false,
            pending: Vec::new(),
            should_quit: false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
