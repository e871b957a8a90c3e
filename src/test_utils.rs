//! Recording handlers, a recording host and an orchestrator fixture.
//!
//! Only compiled in test builds.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::HandlerError;
use crate::handler::{Handler, TextHandler, TextRequest};
use crate::orchestrator::{Host, Orchestrator};
use crate::registry::ModeRegistry;
use crate::types::{InputCode, Mode, ShowArgs, SoundCue, TransitionSet, TransitionTiming};

/// A call made on a handler, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Setup(Mode),
    /// Mode and number of show arguments.
    Show(Mode, usize),
    Clear(Mode),
    Input(Mode, InputCode),
    ShowText(Mode, String),
    ClearText(Mode),
}

/// State shared between the recording handlers and the test.
#[derive(Debug, Default)]
pub struct Journal {
    pub calls: Vec<Call>,
    /// String arguments received by `show`, per mode.
    pub labels: Vec<(Mode, String)>,
    pub fail_show: HashMap<Mode, String>,
    pub fail_setup: HashMap<Mode, String>,
}

pub type SharedJournal = Rc<RefCell<Journal>>;

pub fn new_log() -> SharedJournal {
    Rc::new(RefCell::new(Journal::default()))
}

/// Handler that records every call and keeps a cursor.
pub struct RecordingHandler {
    mode: Mode,
    journal: SharedJournal,
    cursor: usize,
}

impl RecordingHandler {
    pub fn new(mode: Mode, journal: &SharedJournal) -> Self {
        RecordingHandler {
            mode,
            journal: Rc::clone(journal),
            cursor: 0,
        }
    }

    fn record(&self, call: Call) {
        self.journal.borrow_mut().calls.push(call);
    }
}

impl Handler for RecordingHandler {
    fn setup(&mut self) -> Result<(), HandlerError> {
        self.record(Call::Setup(self.mode));
        match self.journal.borrow().fail_setup.get(&self.mode) {
            Some(message) => Err(HandlerError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn show(&mut self, args: ShowArgs) -> Result<(), HandlerError> {
        self.record(Call::Show(self.mode, args.len()));
        let mut journal = self.journal.borrow_mut();
        for i in 0..args.len() {
            if let Some(label) = args.get::<String>(i) {
                journal.labels.push((self.mode, label.clone()));
            }
        }
        match journal.fail_show.get(&self.mode) {
            Some(message) => Err(HandlerError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn clear(&mut self) {
        self.record(Call::Clear(self.mode));
        self.cursor = 0;
    }

    fn process_input(&mut self, code: InputCode) {
        self.record(Call::Input(self.mode, code));
    }

    fn set_cursor(&mut self, cursor: usize) -> bool {
        let changed = self.cursor != cursor;
        self.cursor = cursor;
        changed
    }

    fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Text-capable variant of [`RecordingHandler`].
pub struct RecordingTextHandler {
    inner: RecordingHandler,
}

impl RecordingTextHandler {
    pub fn new(mode: Mode, journal: &SharedJournal) -> Self {
        RecordingTextHandler {
            inner: RecordingHandler::new(mode, journal),
        }
    }
}

impl Handler for RecordingTextHandler {
    fn setup(&mut self) -> Result<(), HandlerError> {
        self.inner.setup()
    }

    fn show(&mut self, args: ShowArgs) -> Result<(), HandlerError> {
        self.inner.show(args)
    }

    fn clear(&mut self) {
        self.inner.clear()
    }

    fn process_input(&mut self, code: InputCode) {
        self.inner.process_input(code)
    }

    fn set_cursor(&mut self, cursor: usize) -> bool {
        self.inner.set_cursor(cursor)
    }

    fn cursor(&self) -> usize {
        self.inner.cursor()
    }
}

impl TextHandler for RecordingTextHandler {
    fn show_text(&mut self, request: TextRequest) {
        self.inner.record(Call::ShowText(self.inner.mode, request.text));
    }

    fn clear_text(&mut self) {
        self.inner.record(Call::ClearText(self.inner.mode));
    }
}

/// Host that records sound cues and exposes a settable automated flag.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub sounds: Vec<SoundCue>,
    pub automated: bool,
}

impl Host for RecordingHost {
    fn play_sound(&mut self, cue: SoundCue) {
        self.sounds.push(cue);
    }

    fn automated(&self) -> bool {
        self.automated
    }
}

/// Modes registered as text-capable by the fixture.
pub const TEXT_MODES: [Mode; 3] = [Mode::Message, Mode::Party, Mode::StarterSelect];

/// An orchestrator over recording handlers.
pub struct Fixture {
    pub ui: Orchestrator<RecordingHost>,
    pub journal: SharedJournal,
}

impl Fixture {
    /// Default heavy modes and default timing.
    pub fn new() -> Self {
        Fixture::with(TransitionSet::default(), TransitionTiming::default())
    }

    pub fn with(transitions: TransitionSet, timing: TransitionTiming) -> Self {
        let journal = new_log();
        let mut builder = ModeRegistry::builder();
        for mode in Mode::ALL {
            builder = if TEXT_MODES.contains(&mode) {
                builder.register_text(mode, RecordingTextHandler::new(mode, &journal))
            } else {
                builder.register(mode, RecordingHandler::new(mode, &journal))
            };
        }
        let registry = builder.build().expect("fixture registers every mode");
        let ui = Orchestrator::new(registry, transitions, timing, RecordingHost::default());
        Fixture { ui, journal }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.journal.borrow().calls.clone()
    }

    /// Return the recorded calls and start a fresh record.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.journal.borrow_mut().calls)
    }

    pub fn shown_labels(&self, mode: Mode) -> Vec<String> {
        self.journal
            .borrow()
            .labels
            .iter()
            .filter(|(m, _)| *m == mode)
            .map(|(_, label)| label.clone())
            .collect()
    }

    pub fn sounds(&self) -> Vec<SoundCue> {
        self.ui.host().sounds.clone()
    }

    pub fn set_automated(&mut self, automated: bool) {
        self.ui.host_mut().automated = automated;
    }

    pub fn fail_show(&mut self, mode: Mode, message: &str) {
        self.journal
            .borrow_mut()
            .fail_show
            .insert(mode, message.to_string());
    }

    pub fn fail_setup(&mut self, mode: Mode, message: &str) {
        self.journal
            .borrow_mut()
            .fail_setup
            .insert(mode, message.to_string());
    }
}
