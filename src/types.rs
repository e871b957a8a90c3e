//! Domain types for ui-orchestrator.
//!
//! Modes, the heavy-mode transition set, opaque input codes, sound cues and
//! the argument bag handed to a screen when it is shown.

use std::any::Any;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// MODES
// ============================================================================

/// Identifier of a UI screen. Exactly one mode is current at any instant.
///
/// Declaration order is the registration order: `Mode::index()` is the
/// ordinal, and `Mode::ALL` lists every mode in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Message box. The initial mode and the text fallback surface.
    Message,
    Command,
    Fight,
    Ball,
    Confirm,
    ModifierSelect,
    Party,
    Summary,
    StarterSelect,
}

impl Mode {
    /// Number of modes.
    pub const COUNT: usize = 9;

    /// Every mode, in declaration order.
    pub const ALL: [Mode; Mode::COUNT] = [
        Mode::Message,
        Mode::Command,
        Mode::Fight,
        Mode::Ball,
        Mode::Confirm,
        Mode::ModifierSelect,
        Mode::Party,
        Mode::Summary,
        Mode::StarterSelect,
    ];

    /// Ordinal of this mode.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mode at the given ordinal, if any.
    pub fn from_index(index: usize) -> Option<Mode> {
        Mode::ALL.get(index).copied()
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Message => "Message",
            Mode::Command => "Command",
            Mode::Fight => "Fight",
            Mode::Ball => "Ball",
            Mode::Confirm => "Confirm",
            Mode::ModifierSelect => "Modifier Select",
            Mode::Party => "Party",
            Mode::Summary => "Summary",
            Mode::StarterSelect => "Starter Select",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Message
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// TRANSITION SET
// ============================================================================

/// Modes whose entry or exit is masked by the overlay fade.
///
/// Fixed once the orchestrator is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionSet {
    heavy: [bool; Mode::COUNT],
}

impl TransitionSet {
    /// A set with no heavy modes: every switch is synchronous.
    pub const fn empty() -> Self {
        TransitionSet {
            heavy: [false; Mode::COUNT],
        }
    }

    /// Build a set from the given modes. Duplicates are harmless.
    pub fn from_modes<I>(modes: I) -> Self
    where
        I: IntoIterator<Item = Mode>,
    {
        let mut set = TransitionSet::empty();
        for mode in modes {
            set.heavy[mode.index()] = true;
        }
        set
    }

    pub fn contains(&self, mode: Mode) -> bool {
        self.heavy[mode.index()]
    }

    /// True when leaving `from` or entering `to` must be masked.
    pub fn masks(&self, from: Mode, to: Mode) -> bool {
        self.contains(from) || self.contains(to)
    }

    /// Heavy modes in declaration order.
    pub fn modes(&self) -> Vec<Mode> {
        Mode::ALL.into_iter().filter(|m| self.contains(*m)).collect()
    }
}

/// Party, Summary and Starter Select are heavy by default.
impl Default for TransitionSet {
    fn default() -> Self {
        TransitionSet::from_modes(DEFAULT_TRANSITION_MODES)
    }
}

/// Heavy modes used when no configuration overrides them.
pub const DEFAULT_TRANSITION_MODES: [Mode; 3] = [Mode::Party, Mode::Summary, Mode::StarterSelect];

// ============================================================================
// TIMING
// ============================================================================

/// Durations of the two fade phases and the settle pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// Length of each fade (in and out).
    pub fade: Duration,
    /// Pause at full opacity before the core switch.
    pub settle: Duration,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        TransitionTiming {
            fade: Duration::from_millis(250),
            settle: Duration::from_millis(100),
        }
    }
}

// ============================================================================
// INPUT AND AUDIO
// ============================================================================

/// Opaque input code. The orchestrator never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputCode(pub u16);

/// Audio feedback the orchestrator asks the host to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Cursor moved / selection confirmed.
    Select,
    /// Rejected action.
    Error,
}

impl SoundCue {
    /// Asset identifier understood by the host's audio layer.
    pub fn id(self) -> &'static str {
        match self {
            SoundCue::Select => "select",
            SoundCue::Error => "error",
        }
    }
}

// ============================================================================
// SHOW ARGUMENTS
// ============================================================================

/// Caller-supplied arguments passed through to `Handler::show` unchanged.
///
/// Handlers know what they expect at each position and downcast with
/// [`ShowArgs::get`].
#[derive(Default)]
pub struct ShowArgs(Vec<Box<dyn Any>>);

impl ShowArgs {
    pub fn new() -> Self {
        ShowArgs(Vec::new())
    }

    /// Append an argument.
    pub fn with<T: Any>(mut self, value: T) -> Self {
        self.0.push(Box::new(value));
        self
    }

    pub fn push<T: Any>(&mut self, value: T) {
        self.0.push(Box::new(value));
    }

    /// Argument at `index`, if present and of type `T`.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.0.get(index).and_then(|arg| arg.downcast_ref::<T>())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ShowArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShowArgs").field("len", &self.0.len()).finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
