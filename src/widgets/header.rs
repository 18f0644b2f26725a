//! Header bar and divider line rendering.
//!
//! The header is a dark blue bar with the monitor title centered, the sound
//! status on the left, and an optional FPS counter on the right. Dividers
//! separate the three trace strips, the observations band, and the numeric
//! vitals column.
//!
//! All fixed positions are `const Point` values and the fill/stroke styles
//! use the const fn constructors of embedded-graphics 0.8, so nothing is
//! computed per frame.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::{
    colors::{GRAY, HEADER_BLUE, RED, WHITE},
    config::{
        HEADER_HEIGHT, OBS_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH, TRACE_AREA_WIDTH, TRACE_STRIP_HEIGHT,
        VITAL_CELL_HEIGHT,
    },
    styles::{CENTERED, LABEL_FONT, LABEL_STYLE_WHITE, RIGHT_ALIGNED, TITLE_STYLE_WHITE},
};

// =============================================================================
// Header Layout Constants
// =============================================================================

/// Position of the title text (centered horizontally).
const HEADER_TITLE_POS: Point = Point::new((SCREEN_WIDTH / 2) as i32, 19);

/// Position of the FPS counter (right-aligned, 5px from edge).
const HEADER_FPS_POS: Point = Point::new((SCREEN_WIDTH - 5) as i32, 17);

/// Position of the sound status label (left edge).
const HEADER_SOUND_POS: Point = Point::new(5, 17);

/// Top-left corner of the header rectangle.
const HEADER_RECT_POS: Point = Point::new(0, 0);

/// Size of the header rectangle (full width).
const HEADER_RECT_SIZE: Size = Size::new(SCREEN_WIDTH, HEADER_HEIGHT);

// =============================================================================
// Divider Line Endpoints
// =============================================================================
//
// Endpoints use SCREEN_WIDTH - 1 / SCREEN_HEIGHT - 1 because valid pixel
// coordinates are exclusive of the upper bound.

/// Vertical divider between the trace area and the vitals column.
const DIV_COL_START: Point = Point::new(TRACE_AREA_WIDTH as i32, HEADER_HEIGHT as i32);
const DIV_COL_END: Point = Point::new(TRACE_AREA_WIDTH as i32, (SCREEN_HEIGHT - 1) as i32);

/// Horizontal divider below the first (ECG) strip.
const DIV_STRIP1_Y: i32 = (HEADER_HEIGHT + TRACE_STRIP_HEIGHT) as i32;

/// Horizontal divider below the second (SpO2) strip.
const DIV_STRIP2_Y: i32 = (HEADER_HEIGHT + 2 * TRACE_STRIP_HEIGHT) as i32;

/// Horizontal divider above the observations band.
const DIV_OBS_Y: i32 = (SCREEN_HEIGHT - OBS_HEIGHT) as i32;

/// Last valid column of the trace area.
const TRACE_RIGHT: i32 = (TRACE_AREA_WIDTH - 1) as i32;

// =============================================================================
// Pre-computed Primitive Styles
// =============================================================================

/// Gray stroke style for divider lines (1px wide).
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);

/// Dark blue fill style for the header background.
const HEADER_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(HEADER_BLUE);

// =============================================================================
// Drawing Functions
// =============================================================================

/// Draw the header bar with title, sound status, and optional FPS counter.
pub fn draw_header(display: &mut SimulatorDisplay<Rgb565>, show_fps: bool, fps: f32, sound_on: bool) {
    Rectangle::new(HEADER_RECT_POS, HEADER_RECT_SIZE)
        .into_styled(HEADER_FILL_STYLE)
        .draw(display)
        .ok();

    Text::with_text_style("PATIENT MONITOR", HEADER_TITLE_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();

    // Sound status on the left, red when muted
    if sound_on {
        Text::new("SND ON", HEADER_SOUND_POS, LABEL_STYLE_WHITE).draw(display).ok();
    } else {
        let muted_style = embedded_graphics::mono_font::MonoTextStyle::new(LABEL_FONT, RED);
        Text::new("MUTED", HEADER_SOUND_POS, muted_style).draw(display).ok();
    }

    // Optional FPS display on the right side
    if show_fps {
        let mut fps_str: String<16> = String::new();
        let _ = write!(fps_str, "{fps:.0} FPS");
        Text::with_text_style(&fps_str, HEADER_FPS_POS, LABEL_STYLE_WHITE, RIGHT_ALIGNED)
            .draw(display)
            .ok();
    }
}

/// Draw the divider lines between strips, the observations band, the vitals
/// column, and the individual vital cells.
pub fn draw_dividers(display: &mut SimulatorDisplay<Rgb565>) {
    // Trace area / vitals column separator
    Line::new(DIV_COL_START, DIV_COL_END)
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();

    // Horizontal separators inside the trace area
    for y in [DIV_STRIP1_Y, DIV_STRIP2_Y, DIV_OBS_Y] {
        Line::new(Point::new(0, y), Point::new(TRACE_RIGHT, y))
            .into_styled(DIVIDER_STYLE)
            .draw(display)
            .ok();
    }

    // Separators between the five vital cells in the right column
    for i in 1..5i32 {
        let y = HEADER_HEIGHT as i32 + i * VITAL_CELL_HEIGHT as i32;
        Line::new(Point::new(TRACE_AREA_WIDTH as i32, y), Point::new((SCREEN_WIDTH - 1) as i32, y))
            .into_styled(DIVIDER_STYLE)
            .draw(display)
            .ok();
    }

    // Divider under the header (white line reads as part of the chrome)
    Line::new(
        Point::new(0, HEADER_HEIGHT as i32 - 1),
        Point::new((SCREEN_WIDTH - 1) as i32, HEADER_HEIGHT as i32 - 1),
    )
    .into_styled(PrimitiveStyle::with_stroke(WHITE, 1))
    .draw(display)
    .ok();
}
