//! Demo screens, one per mode.
//!
//! Each screen is a small menu that publishes its state to the shared
//! [`Board`](super::state::Board). Message, Party and Starter Select can
//! display text; the others rely on the message box fallback.

use std::rc::Rc;

use crate::error::HandlerError;
use crate::handler::{Handler, TextHandler, TextRequest};
use crate::registry::{ModeRegistry, RegistryBuilder};
use crate::types::{InputCode, Mode, ShowArgs};

use super::state::{SharedBoard, CODE_CANCEL, CODE_CONFIRM};

/// Modes whose demo screen is text-capable.
pub const TEXT_MODES: [Mode; 3] = [Mode::Message, Mode::Party, Mode::StarterSelect];

/// Menu entries shown for each mode.
pub fn options(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Message => &[],
        Mode::Command => &["Fight", "Ball", "Party", "Run"],
        Mode::Fight => &["Tackle", "Growl", "Ember", "Quick Attack"],
        Mode::Ball => &["Poke Ball", "Great Ball", "Ultra Ball", "Cancel"],
        Mode::Confirm => &["Yes", "No"],
        Mode::ModifierSelect => &["Potion", "Revive", "Rare Candy"],
        Mode::Party => &["Slot 1", "Slot 2", "Slot 3", "Slot 4", "Slot 5", "Slot 6"],
        Mode::Summary => &["Profile", "Stats", "Moves"],
        Mode::StarterSelect => &["Grass", "Fire", "Water"],
    }
}

// ============================================================================
// MENU SCREEN
// ============================================================================

/// Plain menu: cursor over a fixed list of options.
pub struct MenuScreen {
    mode: Mode,
    board: SharedBoard,
    cursor: usize,
}

impl MenuScreen {
    pub fn new(mode: Mode, board: &SharedBoard) -> Self {
        MenuScreen {
            mode,
            board: Rc::clone(board),
            cursor: 0,
        }
    }

    fn publish_cursor(&self) {
        self.board.borrow_mut().panel_mut(self.mode).cursor = self.cursor;
    }
}

impl Handler for MenuScreen {
    fn setup(&mut self) -> Result<(), HandlerError> {
        if options(self.mode).is_empty() {
            return Err(HandlerError::new(format!("{} has no options", self.mode)));
        }
        self.publish_cursor();
        Ok(())
    }

    fn show(&mut self, args: ShowArgs) -> Result<(), HandlerError> {
        let mut board = self.board.borrow_mut();
        let panel = board.panel_mut(self.mode);
        panel.origin = args.get::<String>(0).cloned();
        if let Some(note) = args.get::<String>(1) {
            panel.note = Some(note.clone());
        }
        drop(board);
        self.publish_cursor();
        Ok(())
    }

    fn clear(&mut self) {
        self.cursor = 0;
        *self.board.borrow_mut().panel_mut(self.mode) = Default::default();
    }

    fn process_input(&mut self, code: InputCode) {
        let selected = options(self.mode).get(self.cursor).copied();
        let mut board = self.board.borrow_mut();
        let panel = board.panel_mut(self.mode);
        match code {
            CODE_CONFIRM => panel.note = selected.map(|option| format!("Selected {}", option)),
            CODE_CANCEL => panel.note = None,
            _ => {}
        }
    }

    fn set_cursor(&mut self, cursor: usize) -> bool {
        let last = options(self.mode).len().saturating_sub(1);
        let cursor = cursor.min(last);
        if cursor == self.cursor {
            return false;
        }
        self.cursor = cursor;
        self.publish_cursor();
        true
    }

    fn cursor(&self) -> usize {
        self.cursor
    }
}

// ============================================================================
// TEXT MENU SCREEN
// ============================================================================

/// Menu that shows messages in its own panel.
pub struct TextMenuScreen {
    menu: MenuScreen,
}

impl TextMenuScreen {
    pub fn new(mode: Mode, board: &SharedBoard) -> Self {
        TextMenuScreen {
            menu: MenuScreen::new(mode, board),
        }
    }
}

impl Handler for TextMenuScreen {
    fn setup(&mut self) -> Result<(), HandlerError> {
        self.menu.setup()
    }

    fn show(&mut self, args: ShowArgs) -> Result<(), HandlerError> {
        self.menu.show(args)
    }

    fn clear(&mut self) {
        self.menu.clear()
    }

    fn process_input(&mut self, code: InputCode) {
        self.menu.process_input(code)
    }

    fn set_cursor(&mut self, cursor: usize) -> bool {
        self.menu.set_cursor(cursor)
    }

    fn cursor(&self) -> usize {
        self.menu.cursor()
    }
}

impl TextHandler for TextMenuScreen {
    fn show_text(&mut self, request: TextRequest) {
        self.menu.board.borrow_mut().panel_mut(self.menu.mode).note = Some(request.text);
        if let Some(callback) = request.on_complete {
            callback();
        }
    }

    fn clear_text(&mut self) {
        self.menu.board.borrow_mut().panel_mut(self.menu.mode).note = None;
    }
}

// ============================================================================
// MESSAGE SCREEN
// ============================================================================

/// The shared message box. Also the text fallback for every other screen.
pub struct MessageScreen {
    board: SharedBoard,
}

impl MessageScreen {
    pub fn new(board: &SharedBoard) -> Self {
        MessageScreen {
            board: Rc::clone(board),
        }
    }
}

impl Handler for MessageScreen {
    fn setup(&mut self) -> Result<(), HandlerError> {
        self.board.borrow_mut().message = Default::default();
        Ok(())
    }

    fn show(&mut self, args: ShowArgs) -> Result<(), HandlerError> {
        if let Some(text) = args.get::<String>(0) {
            self.board.borrow_mut().message.text = text.clone();
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.board.borrow_mut().message = Default::default();
    }

    fn process_input(&mut self, code: InputCode) {
        // Confirm dismisses a prompt.
        if code == CODE_CONFIRM {
            self.board.borrow_mut().message.prompt = false;
        }
    }

    fn set_cursor(&mut self, _cursor: usize) -> bool {
        false
    }

    fn cursor(&self) -> usize {
        0
    }
}

impl TextHandler for MessageScreen {
    fn show_text(&mut self, request: TextRequest) {
        {
            let mut board = self.board.borrow_mut();
            board.message.text = request.text;
            board.message.prompt = request.prompt;
        }
        if let Some(callback) = request.on_complete {
            callback();
        }
    }

    fn clear_text(&mut self) {
        let mut board = self.board.borrow_mut();
        board.message.text.clear();
        board.message.prompt = false;
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Register one demo screen per mode.
pub fn demo_registry(board: &SharedBoard) -> RegistryBuilder {
    let mut builder = ModeRegistry::builder().register_text(Mode::Message, MessageScreen::new(board));
    for mode in Mode::ALL.into_iter().filter(|m| *m != Mode::Message) {
        builder = if TEXT_MODES.contains(&mode) {
            builder.register_text(mode, TextMenuScreen::new(mode, board))
        } else {
            builder.register(mode, MenuScreen::new(mode, board))
        };
    }
    builder
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::Board;
    use std::cell::RefCell;

    fn board() -> SharedBoard {
        Rc::new(RefCell::new(Board::new()))
    }

    #[test]
    fn every_menu_mode_has_options() {
        for mode in Mode::ALL.into_iter().filter(|m| *m != Mode::Message) {
            assert!(!options(mode).is_empty(), "{} has no options", mode);
        }
    }

    #[test]
    fn cursor_is_clamped_to_options() {
        let board = board();
        let mut screen = MenuScreen::new(Mode::Confirm, &board);

        assert!(screen.set_cursor(9));
        assert_eq!(screen.cursor(), 1);
        assert!(!screen.set_cursor(1));
        assert_eq!(board.borrow().panel(Mode::Confirm).cursor, 1);
    }

    #[test]
    fn confirm_notes_selected_option() {
        let board = board();
        let mut screen = MenuScreen::new(Mode::Fight, &board);
        screen.set_cursor(2);
        screen.process_input(CODE_CONFIRM);

        assert_eq!(
            board.borrow().panel(Mode::Fight).note.as_deref(),
            Some("Selected Ember")
        );

        screen.process_input(CODE_CANCEL);
        assert_eq!(board.borrow().panel(Mode::Fight).note, None);
    }

    #[test]
    fn show_records_origin_and_clear_resets_panel() {
        let board = board();
        let mut screen = MenuScreen::new(Mode::Ball, &board);
        screen.set_cursor(3);
        screen
            .show(ShowArgs::new().with(String::from("from Command")))
            .unwrap();
        assert_eq!(
            board.borrow().panel(Mode::Ball).origin.as_deref(),
            Some("from Command")
        );

        screen.clear();
        assert_eq!(screen.cursor(), 0);
        assert_eq!(board.borrow().panel(Mode::Ball), &Default::default());
    }

    #[test]
    fn message_screen_shows_text_and_runs_callback() {
        let board = board();
        let mut screen = MessageScreen::new(&board);
        let done = Rc::new(RefCell::new(false));
        let flag = Rc::clone(&done);

        screen.show_text(
            TextRequest::new("Go!")
                .prompt(true)
                .on_complete(move || *flag.borrow_mut() = true),
        );

        assert_eq!(board.borrow().message.text, "Go!");
        assert!(board.borrow().message.prompt);
        assert!(*done.borrow());

        screen.process_input(CODE_CONFIRM);
        assert!(!board.borrow().message.prompt);
    }

    #[test]
    fn text_menu_screen_writes_to_its_panel() {
        let board = board();
        let mut screen = TextMenuScreen::new(Mode::Party, &board);
        screen.show_text(TextRequest::new("Choose a slot"));
        assert_eq!(
            board.borrow().panel(Mode::Party).note.as_deref(),
            Some("Choose a slot")
        );
        screen.clear_text();
        assert_eq!(board.borrow().panel(Mode::Party).note, None);
    }

    #[test]
    fn demo_registry_is_complete() {
        let board = board();
        let registry = demo_registry(&board).build().unwrap();
        for mode in Mode::ALL {
            assert_eq!(registry.is_text_capable(mode), TEXT_MODES.contains(&mode));
        }
    }
}
