//! Pure rendering: map App state to ratatui widget trees.
//!
//! The active screen is drawn from the shared board, then the overlay is
//! applied on top by darkening every cell's colors toward black.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::types::Mode;

use super::screens::options;
use super::state::{App, Board};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the active screen, message box and overlay.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(4), // message box
        Constraint::Length(1), // status
        Constraint::Length(1), // help
    ])
    .split(area);

    let board = app.board.borrow();
    let mode = app.ui.mode();

    frame.render_widget(Block::default().style(theme::STYLE_BASE), area);
    frame.render_widget(render_title(app), chunks[0]);
    if mode != Mode::Message {
        render_menu(&board, mode, frame, chunks[1]);
    }
    frame.render_widget(render_message(&board), chunks[2]);
    frame.render_widget(render_status(&board), chunks[3]);
    frame.render_widget(render_help(), chunks[4]);

    let alpha = app.ui.overlay().effective_alpha();
    if alpha > 0.0 {
        apply_overlay(frame.buffer_mut(), area, alpha);
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: mode name, heavy marker, switch policy.
fn render_title(app: &App) -> Paragraph<'static> {
    let mode = app.ui.mode();
    let mut spans = vec![Span::styled(mode.label(), theme::STYLE_TITLE)];

    if app.ui.transitions().contains(mode) {
        spans.push(Span::styled("  [heavy]", theme::STYLE_WARNING));
    }
    if app.preserve {
        spans.push(Span::styled("  [preserve]", theme::STYLE_INTERACTIVE));
    }
    if app.ui.is_transitioning() {
        spans.push(Span::styled("  switching...", theme::STYLE_DIM));
    }

    Paragraph::new(Line::from(spans))
}

fn render_status(board: &Board) -> Paragraph<'static> {
    let sound = board
        .last_sound
        .map(|cue| format!("  ♪ {} ({})", cue.id(), board.sounds_played))
        .unwrap_or_default();

    Paragraph::new(Line::from(vec![
        Span::styled(board.status.clone(), theme::STYLE_SAFE),
        Span::styled(sound, theme::STYLE_DIM),
    ]))
}

fn render_help() -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        "[1-9] mode  [Tab] preserve  [a] automated  [j/k] move  [Enter] select  [t/c] text  [q] quit",
        theme::STYLE_HELP,
    )))
}

// ============================================================================
// SCREENS
// ============================================================================

/// Menu options with the cursor row highlighted.
fn render_menu(board: &Board, mode: Mode, frame: &mut Frame, area: Rect) {
    let panel = board.panel(mode);
    let mut lines: Vec<Line> = Vec::new();

    if let Some(origin) = &panel.origin {
        lines.push(Line::from(Span::styled(format!("  {}", origin), theme::STYLE_DIM)));
        lines.push(Line::from(""));
    }

    for (i, option) in options(mode).iter().enumerate() {
        let line = if i == panel.cursor {
            Line::from(format!("  > {}", option)).style(theme::STYLE_CURSOR)
        } else {
            Line::from(format!("    {}", option))
        };
        lines.push(line);
    }

    if let Some(note) = &panel.note {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", note), theme::STYLE_SAFE)));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_message(board: &Board) -> Paragraph<'static> {
    let mut text = board.message.text.clone();
    if board.message.prompt {
        text.push_str(" ▼");
    }
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).style(theme::STYLE_MESSAGE))
}

// ============================================================================
// OVERLAY
// ============================================================================

/// Darken every cell in `area` by the overlay opacity, keeping its hue.
fn apply_overlay(buffer: &mut Buffer, area: Rect, alpha: f32) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.fg = theme::darken(cell.fg, alpha, theme::FOREGROUND);
                cell.bg = theme::darken(cell.bg, alpha, theme::BACKGROUND);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
