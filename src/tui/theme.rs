//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics:
//! - Cyan: interactive elements (keybinding hints, cursor)
//! - Yellow: heavy screens (entry/exit is faded)
//! - Green: confirmations and status
//! - Dim: de-emphasized (origins, counters)
//!
//! The overlay darkens whatever is already drawn, so every color here must
//! resolve to RGB (`to_rgb`).

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Status / success: green.
pub const STYLE_SAFE: Style = Style::new().fg(Color::Green);

/// Heavy mode marker: yellow.
pub const STYLE_WARNING: Style = Style::new().fg(Color::Yellow);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Cursor row in a menu.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Message box border.
pub const STYLE_MESSAGE: Style = Style::new().fg(Color::White);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

// ============================================================================
// BASE
// ============================================================================

/// Screen background. Painted explicitly so the overlay has a known color
/// to darken.
pub const BACKGROUND: Color = Color::Rgb(24, 24, 32);

/// Default text color.
pub const FOREGROUND: Color = Color::Rgb(220, 220, 220);

/// Applied to the whole frame before anything else is drawn.
pub const STYLE_BASE: Style = Style::new().fg(FOREGROUND).bg(BACKGROUND);

// ============================================================================
// OVERLAY
// ============================================================================

/// xterm's default values for the 16 ANSI colors.
const ANSI: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Resolve `color` to RGB. `Color::Reset` resolves to `fallback`.
pub fn to_rgb(color: Color, fallback: (u8, u8, u8)) -> (u8, u8, u8) {
    match color {
        Color::Reset => fallback,
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Indexed(i) => indexed_rgb(i),
        Color::Black => ANSI[0],
        Color::Red => ANSI[1],
        Color::Green => ANSI[2],
        Color::Yellow => ANSI[3],
        Color::Blue => ANSI[4],
        Color::Magenta => ANSI[5],
        Color::Cyan => ANSI[6],
        Color::Gray => ANSI[7],
        Color::DarkGray => ANSI[8],
        Color::LightRed => ANSI[9],
        Color::LightGreen => ANSI[10],
        Color::LightYellow => ANSI[11],
        Color::LightBlue => ANSI[12],
        Color::LightMagenta => ANSI[13],
        Color::LightCyan => ANSI[14],
        Color::White => ANSI[15],
    }
}

/// 256-color palette: ANSI, then the 6x6x6 cube, then a grey ramp.
fn indexed_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => ANSI[index as usize],
        16..=231 => {
            let i = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + 40 * v };
            (level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        _ => {
            let v = 8 + 10 * (index - 232);
            (v, v, v)
        }
    }
}

/// Darken `color` toward black by the overlay opacity.
///
/// `fallback` stands in for `Color::Reset`. At alpha 0 the color is kept
/// (as RGB); at alpha 1 it is black.
pub fn darken(color: Color, alpha: f32, fallback: Color) -> Color {
    let fallback = to_rgb(fallback, (0, 0, 0));
    let (r, g, b) = to_rgb(color, fallback);
    let keep = 1.0 - alpha.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * keep).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

// ============================================================================
// TESTS
// ============================================================================
