//! ui-orchestrator: one active UI screen at a time, faded mode switches,
//! input and text routed to whichever screen is showing.

pub mod anim;
pub mod completion;
pub mod config;
pub mod error;
pub mod handler;
pub mod orchestrator;
pub mod registry;
pub mod tui;
pub mod types;

#[cfg(test)]
mod test_utils;
