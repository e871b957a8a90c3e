//! The orchestrator: one active screen, faded mode switches, routed input.
//!
//! A switch between two light modes happens synchronously. A switch into
//! or out of a heavy mode runs through a small phase machine driven by
//! [`Orchestrator::tick`]:
//!
//! ```text
//! Idle -> FadeIn -> Settle -> (core switch, resolve) -> FadeOut -> Idle
//! ```
//!
//! The switch counts as in flight during `FadeIn` and `Settle`; input is
//! dropped and further switch requests are rejected with
//! [`SwitchError::Busy`] until the core switch has run.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::anim::{Easing, Overlay, Tween};
use crate::completion::{Resolver, SwitchCompletion, SwitchResult};
use crate::error::{SetupError, SwitchError};
use crate::handler::{Handler, TextHandler, TextRequest};
use crate::registry::ModeRegistry;
use crate::types::{InputCode, Mode, ShowArgs, SoundCue, TransitionSet, TransitionTiming};

// ============================================================================
// HOST
// ============================================================================

/// Services the embedding application provides.
pub trait Host {
    /// Play an audio cue.
    fn play_sound(&mut self, cue: SoundCue);

    /// Automated/headless runs skip every transition animation.
    ///
    /// Read on each switch request.
    fn automated(&self) -> bool;
}

// ============================================================================
// PHASES
// ============================================================================

/// A switch waiting for its core switch to run.
#[derive(Debug)]
struct PendingSwitch {
    target: Mode,
    clear: bool,
    args: ShowArgs,
    resolver: Resolver,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    /// Overlay fading to opaque.
    FadeIn { tween: Tween, pending: PendingSwitch },
    /// Fully opaque, waiting before the swap.
    Settle { remaining: Duration, pending: PendingSwitch },
    /// Swap done, overlay fading back out.
    FadeOut { tween: Tween },
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

/// Owns every screen and decides which one is active.
pub struct Orchestrator<H: Host> {
    mode: Mode,
    registry: ModeRegistry,
    transitions: TransitionSet,
    timing: TransitionTiming,
    overlay: Overlay,
    phase: Phase,
    host: H,
}

impl<H: Host> Orchestrator<H> {
    /// Create an orchestrator starting in [`Mode::Message`].
    pub fn new(
        registry: ModeRegistry,
        transitions: TransitionSet,
        timing: TransitionTiming,
        host: H,
    ) -> Self {
        Orchestrator {
            mode: Mode::Message,
            registry,
            transitions,
            timing,
            overlay: Overlay::new(),
            phase: Phase::Idle,
            host,
        }
    }

    /// Run every handler's one-time setup and reset the overlay.
    ///
    /// Meant to run before the first switch. If a transition is playing,
    /// the overlay is left to it.
    pub fn setup(&mut self) -> Result<(), SetupError> {
        for mode in Mode::ALL {
            self.registry
                .handler_mut(mode)
                .setup()
                .map_err(|source| SetupError { mode, source })?;
        }
        if matches!(self.phase, Phase::Idle) {
            self.overlay = Overlay::new();
        }
        info!(modes = Mode::COUNT, "UI handlers set up");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True while a faded switch has not yet swapped screens.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::FadeIn { .. } | Phase::Settle { .. })
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn transitions(&self) -> &TransitionSet {
        &self.transitions
    }

    pub fn active_handler(&self) -> &dyn Handler {
        self.registry.handler(self.mode)
    }

    pub fn active_handler_mut(&mut self) -> &mut dyn Handler {
        self.registry.handler_mut(self.mode)
    }

    /// The message-mode handler, used as the shared text surface.
    pub fn message_handler_mut(&mut self) -> &mut dyn TextHandler {
        self.registry.message_handler_mut()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ------------------------------------------------------------------------
    // Mode switching
    // ------------------------------------------------------------------------

    /// Switch to `mode`, clearing the outgoing screen.
    ///
    /// Switching to the current mode resolves `Ok` at once. While a faded
    /// switch is in flight the current mode is still the one being left, so
    /// that `Ok` does not cancel or reverse the pending switch.
    pub fn switch_mode(&mut self, mode: Mode, args: ShowArgs) -> SwitchCompletion {
        self.request_switch(mode, true, args)
    }

    /// Switch to `mode` without clearing the outgoing screen, so it can be
    /// resumed later with its state intact.
    pub fn switch_mode_preserving(&mut self, mode: Mode, args: ShowArgs) -> SwitchCompletion {
        self.request_switch(mode, false, args)
    }

    fn request_switch(&mut self, target: Mode, clear: bool, args: ShowArgs) -> SwitchCompletion {
        if target == self.mode {
            return SwitchCompletion::ready(Ok(()));
        }

        if let Some(in_flight) = self.in_flight_target() {
            warn!(requested = %target, %in_flight, "Mode switch rejected during transition");
            return SwitchCompletion::ready(Err(SwitchError::Busy {
                requested: target,
                in_flight,
            }));
        }

        let animate = self.transitions.masks(self.mode, target) && !self.host.automated();
        if !animate {
            return SwitchCompletion::ready(self.core_switch(target, clear, args));
        }

        debug!(from = %self.mode, to = %target, clear, "Starting faded mode switch");
        let (resolver, completion) = SwitchCompletion::pending();
        self.overlay.set_alpha(0.0);
        self.overlay.set_visible(true);
        // Supersedes any fade-out still playing from the previous switch.
        self.phase = Phase::FadeIn {
            tween: Tween::new(0.0, 1.0, self.timing.fade, Easing::SineOut),
            pending: PendingSwitch {
                target,
                clear,
                args,
                resolver,
            },
        };
        completion
    }

    fn in_flight_target(&self) -> Option<Mode> {
        match &self.phase {
            Phase::FadeIn { pending, .. } | Phase::Settle { pending, .. } => Some(pending.target),
            Phase::Idle | Phase::FadeOut { .. } => None,
        }
    }

    /// Clear the outgoing screen if asked, change mode, show the new screen.
    fn core_switch(&mut self, target: Mode, clear: bool, args: ShowArgs) -> SwitchResult {
        let from = self.mode;
        if clear {
            self.registry.handler_mut(from).clear();
        }
        self.mode = target;
        info!(%from, to = %target, clear, "Mode switched");

        self.registry
            .handler_mut(target)
            .show(args)
            .map_err(|source| {
                warn!(mode = %target, error = %source, "Handler failed to show");
                SwitchError::Handler {
                    mode: target,
                    source,
                }
            })
    }

    /// Advance the transition by `dt` of host time.
    ///
    /// Time left over when a phase ends carries into the next one, so the
    /// outcome does not depend on how the host slices time.
    pub fn tick(&mut self, dt: Duration) {
        let mut budget = dt;
        loop {
            match std::mem::take(&mut self.phase) {
                Phase::Idle => break,
                Phase::FadeIn { mut tween, pending } => {
                    let leftover = tween.advance(budget);
                    self.overlay.set_alpha(tween.value());
                    match leftover {
                        Some(rest) => {
                            budget = rest;
                            self.phase = Phase::Settle {
                                remaining: self.timing.settle,
                                pending,
                            };
                        }
                        None => {
                            self.phase = Phase::FadeIn { tween, pending };
                            break;
                        }
                    }
                }
                Phase::Settle { remaining, pending } => {
                    if budget < remaining {
                        self.phase = Phase::Settle {
                            remaining: remaining - budget,
                            pending,
                        };
                        break;
                    }
                    budget -= remaining;

                    let PendingSwitch {
                        target,
                        clear,
                        args,
                        resolver,
                    } = pending;
                    let result = self.core_switch(target, clear, args);
                    resolver.resolve(result);

                    self.phase = Phase::FadeOut {
                        tween: Tween::new(1.0, 0.0, self.timing.fade, Easing::SineIn),
                    };
                }
                Phase::FadeOut { mut tween } => {
                    let leftover = tween.advance(budget);
                    self.overlay.set_alpha(tween.value());
                    if leftover.is_some() {
                        self.overlay.set_visible(false);
                        debug!(mode = %self.mode, "Transition finished");
                    } else {
                        self.phase = Phase::FadeOut { tween };
                    }
                    break;
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------------

    /// Forward an input code to the active screen.
    ///
    /// Dropped while a transition is in flight. Returns whether the code
    /// was delivered.
    pub fn process_input(&mut self, code: InputCode) -> bool {
        if self.is_transitioning() {
            debug!(?code, "Input dropped during transition");
            return false;
        }
        self.active_handler_mut().process_input(code);
        true
    }

    /// Show text on the active screen, or on the message screen if the
    /// active one cannot display text.
    pub fn show_text(&mut self, request: TextRequest) {
        self.text_target().show_text(request);
    }

    pub fn clear_text(&mut self) {
        self.text_target().clear_text();
    }

    fn text_target(&mut self) -> &mut dyn TextHandler {
        self.registry.text_surface_mut(self.mode)
    }

    /// Move the active screen's cursor, playing the select cue if it moved.
    pub fn set_cursor(&mut self, cursor: usize) -> bool {
        let changed = self.active_handler_mut().set_cursor(cursor);
        if changed {
            self.play_select();
        }
        changed
    }

    pub fn cursor(&self) -> usize {
        self.active_handler().cursor()
    }

    pub fn play_select(&mut self) {
        self.host.play_sound(SoundCue::Select);
    }

    pub fn play_error(&mut self) {
        self.host.play_sound(SoundCue::Error);
    }
}

impl<H: Host> std::fmt::Debug for Orchestrator<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("mode", &self.mode)
            .field("phase", &self.phase)
            .field("overlay", &self.overlay)
            .field("registry", &self.registry)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
