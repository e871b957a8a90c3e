//! Screen capability contract.
//!
//! A [`Handler`] is one self-contained screen. The orchestrator drives it
//! only through these methods and never looks at its internals. Screens
//! that can render queued text implement [`TextHandler`] as well.

use std::time::Duration;

use crate::error::HandlerError;
use crate::types::{InputCode, ShowArgs};

/// Lifecycle and input contract shared by every screen.
pub trait Handler {
    /// One-time initialization, called once from `Orchestrator::setup`.
    fn setup(&mut self) -> Result<(), HandlerError>;

    /// Activate the screen with the arguments passed to the switch.
    fn show(&mut self, args: ShowArgs) -> Result<(), HandlerError>;

    /// Reset internal state when the screen is left with a clearing switch.
    fn clear(&mut self);

    /// React to an input code while this screen is active.
    fn process_input(&mut self, code: InputCode);

    /// Move the cursor. Returns true only if the position changed.
    fn set_cursor(&mut self, cursor: usize) -> bool;

    /// Current cursor position.
    fn cursor(&self) -> usize;
}

/// A screen that can also display queued text.
pub trait TextHandler: Handler {
    fn show_text(&mut self, request: TextRequest);

    fn clear_text(&mut self);
}

/// Callback run once a text request has finished displaying.
pub type TextCallback = Box<dyn FnOnce()>;

/// A message to display, with optional pacing and completion callback.
pub struct TextRequest {
    pub text: String,
    /// Per-character reveal delay.
    pub delay: Option<Duration>,
    pub on_complete: Option<TextCallback>,
    /// Wait after the text is fully shown before running `on_complete`.
    pub complete_delay: Option<Duration>,
    /// Show an "awaiting input" prompt once the text is complete.
    pub prompt: bool,
}

impl TextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        TextRequest {
            text: text.into(),
            delay: None,
            on_complete: None,
            complete_delay: None,
            prompt: false,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn complete_delay(mut self, delay: Duration) -> Self {
        self.complete_delay = Some(delay);
        self
    }

    pub fn prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }
}

impl std::fmt::Debug for TextRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRequest")
            .field("text", &self.text)
            .field("delay", &self.delay)
            .field("on_complete", &self.on_complete.is_some())
            .field("complete_delay", &self.complete_delay)
            .field("prompt", &self.prompt)
            .finish()
    }
}
