//! Non-modal popup overlays for status messages.
//!
//! Popups appear centered on screen with a white border and dark blue
//! background. Only one popup displays at a time (most recent wins). Input
//! keeps working while a popup is visible.
//!
//! All popup geometry and text positions are `const` values computed at
//! compile time, and fill styles use the const fn `PrimitiveStyle`
//! constructors of embedded-graphics 0.8.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;

use crate::colors::{HEADER_BLUE, WHITE};
use crate::config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::styles::{CENTERED, TITLE_STYLE_WHITE};

// =============================================================================
// Popup Layout Constants
// =============================================================================

/// Width of the single-line status popups.
const POPUP_WIDTH: u32 = 180;
/// Height of the single-line status popups.
const POPUP_HEIGHT: u32 = 50;
/// X position (centered on screen).
const POPUP_X: i32 = (SCREEN_WIDTH - POPUP_WIDTH) as i32 / 2;
/// Y position (centered on screen).
const POPUP_Y: i32 = (SCREEN_HEIGHT - POPUP_HEIGHT) as i32 / 2;

/// Position of the single line of popup text (vertically centered).
const POPUP_TEXT_POS: Point = Point::new(CENTER_X, CENTER_Y + 5);

/// Popup border rectangle (outer white rectangle).
const POPUP_BORDER_POS: Point = Point::new(POPUP_X - 3, POPUP_Y - 3);
const POPUP_BORDER_SIZE: Size = Size::new(POPUP_WIDTH + 6, POPUP_HEIGHT + 6);

/// Popup background rectangle (inner blue rectangle).
const POPUP_BG_POS: Point = Point::new(POPUP_X, POPUP_Y);
const POPUP_BG_SIZE: Size = Size::new(POPUP_WIDTH, POPUP_HEIGHT);

// =============================================================================
// Pre-computed Primitive Styles
// =============================================================================

/// White fill style for popup borders.
const WHITE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);

/// Dark blue fill style for popup backgrounds.
const BLUE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(HEADER_BLUE);

// =============================================================================
// Drawing Functions
// =============================================================================

/// Draw the shared popup frame (white border, blue background).
fn draw_popup_frame(display: &mut SimulatorDisplay<Rgb565>) {
    Rectangle::new(POPUP_BORDER_POS, POPUP_BORDER_SIZE)
        .into_styled(WHITE_FILL)
        .draw(display)
        .ok();
    Rectangle::new(POPUP_BG_POS, POPUP_BG_SIZE)
        .into_styled(BLUE_FILL)
        .draw(display)
        .ok();
}

/// Draw the "SOUNDS ON/OFF" popup (audio toggle).
pub fn draw_audio_popup(display: &mut SimulatorDisplay<Rgb565>, sound_on: bool) {
    draw_popup_frame(display);
    let status = if sound_on { "SOUNDS ON" } else { "SOUNDS OFF" };
    Text::with_text_style(status, POPUP_TEXT_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

/// Draw the "FPS ON/OFF" popup.
pub fn draw_fps_toggle_popup(display: &mut SimulatorDisplay<Rgb565>, fps_enabled: bool) {
    draw_popup_frame(display);
    let status = if fps_enabled { "FPS ON" } else { "FPS OFF" };
    Text::with_text_style(status, POPUP_TEXT_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}

/// Draw the "DISPLAY RESET" popup shown after waveform re-initialization.
pub fn draw_reset_popup(display: &mut SimulatorDisplay<Rgb565>) {
    draw_popup_frame(display);
    Text::with_text_style("DISPLAY RESET", POPUP_TEXT_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();
}
