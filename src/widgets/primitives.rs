//! Low-level drawing primitives shared across widgets.
//!
//! # Cell Background Inset
//!
//! `draw_cell_background` draws rectangles with a 2px inset from the cell
//! boundaries. With the display cleared to black this leaves thin black
//! borders between cells without explicit border drawing.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics_simulator::SimulatorDisplay;

/// Draw a cell's background rectangle with 2px inset.
///
/// Returns early if dimensions are too small (w < 4 or h < 4) to prevent
/// u32 underflow in the size calculation.
pub fn draw_cell_background(
    display: &mut SimulatorDisplay<Rgb565>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    bg_color: Rgb565,
) {
    if w < 4 || h < 4 {
        return;
    }
    Rectangle::new(Point::new(x as i32 + 2, y as i32 + 2), Size::new(w - 4, h - 4))
        .into_styled(PrimitiveStyle::with_fill(bg_color))
        .draw(display)
        .ok();
}

/// Draw a trend arrow indicator (up or down).
///
/// The arrow is drawn with three line segments: a vertical shaft and two
/// diagonal segments forming the arrowhead.
///
/// # Parameters
/// - `x`, `y`: Center point of the arrow
/// - `rising`: `true` for up arrow, `false` for down arrow
/// - `color`: Arrow stroke color
pub fn draw_trend_arrow(display: &mut SimulatorDisplay<Rgb565>, x: i32, y: i32, rising: bool, color: Rgb565) {
    let arrow_style = PrimitiveStyle::with_stroke(color, 1);
    if rising {
        Line::new(Point::new(x, y + 4), Point::new(x, y - 4))
            .into_styled(arrow_style)
            .draw(display)
            .ok();
        Line::new(Point::new(x - 3, y - 1), Point::new(x, y - 4))
            .into_styled(arrow_style)
            .draw(display)
            .ok();
        Line::new(Point::new(x + 3, y - 1), Point::new(x, y - 4))
            .into_styled(arrow_style)
            .draw(display)
            .ok();
    } else {
        Line::new(Point::new(x, y - 4), Point::new(x, y + 4))
            .into_styled(arrow_style)
            .draw(display)
            .ok();
        Line::new(Point::new(x - 3, y + 1), Point::new(x, y + 4))
            .into_styled(arrow_style)
            .draw(display)
            .ok();
        Line::new(Point::new(x + 3, y + 1), Point::new(x, y + 4))
            .into_styled(arrow_style)
            .draw(display)
            .ok();
    }
}
