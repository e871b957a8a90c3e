//! Terminal demo host for the orchestrator.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: data types (Board, Command, App) and the terminal host
//! - `screens`: one demo screen per mode
//! - `update`: commands applied through the orchestrator
//! - `view`: pure rendering, overlay included
//! - `run`: effects (terminal, key reader, frame loop)

pub mod run;
pub mod screens;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::UiConfig;
use crate::orchestrator::Orchestrator;

use state::{App, Board, SharedBoard, TerminalHost};

/// Build the demo app from config: screens, orchestrator, setup.
pub fn build_app(config: &UiConfig) -> Result<App, String> {
    let board: SharedBoard = Rc::new(RefCell::new(Board::new()));
    let registry = screens::demo_registry(&board)
        .build()
        .map_err(|e| e.to_string())?;
    let host = TerminalHost::new(Rc::clone(&board), config.automated);

    let mut ui = Orchestrator::new(registry, config.transition_set(), config.timing(), host);
    ui.setup().map_err(|e| e.to_string())?;

    Ok(App::new(ui, board))
}
