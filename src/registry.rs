//! Mode registry: exactly one handler per mode.
//!
//! Built once through [`RegistryBuilder`], which rejects missing and
//! duplicate registrations. A built registry is total, so lookups cannot
//! fail. Each slot records whether its handler is text-capable, which
//! replaces runtime type probing when routing text.

use crate::error::RegistryError;
use crate::handler::{Handler, TextHandler};
use crate::types::Mode;

/// A registered handler, tagged with its capability.
enum Slot {
    Plain(Box<dyn Handler>),
    Text(Box<dyn TextHandler>),
}

/// Total mapping from [`Mode`] to its handler, indexed by ordinal.
pub struct ModeRegistry {
    slots: Vec<Slot>,
}

impl ModeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn handler(&self, mode: Mode) -> &dyn Handler {
        match &self.slots[mode.index()] {
            Slot::Plain(handler) => handler.as_ref(),
            Slot::Text(handler) => handler.as_ref(),
        }
    }

    pub fn handler_mut(&mut self, mode: Mode) -> &mut dyn Handler {
        match &mut self.slots[mode.index()] {
            Slot::Plain(handler) => handler.as_mut(),
            Slot::Text(handler) => handler.as_mut(),
        }
    }

    /// The handler for `mode` if it was registered as text-capable.
    pub fn text_handler_mut(&mut self, mode: Mode) -> Option<&mut dyn TextHandler> {
        match &mut self.slots[mode.index()] {
            Slot::Plain(_) => None,
            Slot::Text(handler) => Some(handler.as_mut()),
        }
    }

    pub fn is_text_capable(&self, mode: Mode) -> bool {
        matches!(self.slots[mode.index()], Slot::Text(_))
    }

    /// The message-mode handler, which `build` guarantees is text-capable.
    pub fn message_handler_mut(&mut self) -> &mut dyn TextHandler {
        self.text_surface_mut(Mode::Message)
    }

    /// Where text for `mode` should go: its own handler if text-capable,
    /// the message handler otherwise.
    pub fn text_surface_mut(&mut self, mode: Mode) -> &mut dyn TextHandler {
        let index = if self.is_text_capable(mode) {
            mode.index()
        } else {
            Mode::Message.index()
        };
        match &mut self.slots[index] {
            Slot::Text(handler) => handler.as_mut(),
            Slot::Plain(_) => unreachable!("registry built without a text-capable message handler"),
        }
    }
}

impl std::fmt::Debug for ModeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text_capable: Vec<Mode> = Mode::ALL
            .into_iter()
            .filter(|m| self.is_text_capable(*m))
            .collect();
        f.debug_struct("ModeRegistry")
            .field("modes", &self.slots.len())
            .field("text_capable", &text_capable)
            .finish()
    }
}

/// Collects one handler per mode, then validates the whole set.
#[derive(Default)]
pub struct RegistryBuilder {
    slots: Vec<(Mode, Slot)>,
}

impl RegistryBuilder {
    /// Register a handler without text support.
    pub fn register(mut self, mode: Mode, handler: impl Handler + 'static) -> Self {
        self.slots.push((mode, Slot::Plain(Box::new(handler))));
        self
    }

    /// Register a text-capable handler.
    pub fn register_text(mut self, mode: Mode, handler: impl TextHandler + 'static) -> Self {
        self.slots.push((mode, Slot::Text(Box::new(handler))));
        self
    }

    /// Validate and freeze the registry.
    ///
    /// Every mode must be registered exactly once and the message mode must
    /// be text-capable.
    pub fn build(self) -> Result<ModeRegistry, RegistryError> {
        let mut ordered: Vec<Option<Slot>> = Mode::ALL.iter().map(|_| None).collect();

        for (mode, slot) in self.slots {
            let entry = &mut ordered[mode.index()];
            if entry.is_some() {
                return Err(RegistryError::Duplicate(mode));
            }
            *entry = Some(slot);
        }

        let mut slots = Vec::with_capacity(Mode::COUNT);
        for (mode, slot) in Mode::ALL.into_iter().zip(ordered) {
            slots.push(slot.ok_or(RegistryError::Missing(mode))?);
        }

        if !matches!(slots[Mode::Message.index()], Slot::Text(_)) {
            return Err(RegistryError::MessageNotTextCapable);
        }

        Ok(ModeRegistry { slots })
    }
}

// ============================================================================
// TESTS
// ============================================================================
