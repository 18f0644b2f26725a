//! Numeric vital cells for the right-hand column and the observations band.
//!
//! Each cell displays one vital with:
//! - Label in the top-left corner (e.g., "HR", "SpO2")
//! - Unit next to the label in gray
//! - Main value centered in a large font, tinted with the channel color
//! - Optional trend arrow next to the value
//!
//! A reading that is missing or unparseable renders as `--`, never as a
//! crash. Cells redraw their background every frame - values change with
//! every intake update and stale text would otherwise linger.
//!
//! The heart rate cell additionally shows a pulse indicator dot that lights
//! up for a moment whenever the heart beep fires, tying the audio cadence to
//! the display.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyle},
    text::Text,
};
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::{
    colors::{BLACK, ECG_GREEN, ETCO2_YELLOW, SPO2_CYAN, WHITE},
    config::{OBS_HEIGHT, SCREEN_HEIGHT, TRACE_AREA_WIDTH},
    state::VitalTrend,
    styles::{
        CENTERED, LABEL_FONT, LABEL_STYLE_GRAY, LABEL_STYLE_WHITE, LEFT_ALIGNED, VALUE_FONT, VALUE_FONT_MEDIUM,
        VALUE_STYLE_WHITE,
    },
    vitals::VitalsRecord,
    widgets::primitives::{draw_cell_background, draw_trend_arrow},
};

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Select the value style for a channel color.
///
/// Returns the static `VALUE_STYLE_WHITE` when possible; only channel tints
/// require constructing a style at the call site.
fn value_style_for_color(color: Rgb565) -> MonoTextStyle<'static, Rgb565> {
    if color == WHITE {
        VALUE_STYLE_WHITE
    } else {
        MonoTextStyle::new(VALUE_FONT, color)
    }
}

/// Format a reading with the given number of decimals, or `--` when absent.
fn format_value(value: Option<f32>, decimals: usize) -> String<16> {
    let mut s: String<16> = String::new();
    match value {
        Some(v) => {
            let _ = write!(s, "{v:.decimals$}");
        }
        None => {
            let _ = s.push_str("--");
        }
    }
    s
}

// =============================================================================
// Generic Vital Cell
// =============================================================================

/// Draw one numeric vital cell.
///
/// # Parameters
/// - `x`, `y`, `w`, `h`: cell rectangle
/// - `label`, `unit`: corner annotations
/// - `value`: formatted reading (already `--` when absent)
/// - `color`: channel tint for the value text
/// - `trend`: optional rising/falling arrow
#[allow(clippy::too_many_arguments)]
pub fn draw_vital_cell(
    display: &mut SimulatorDisplay<Rgb565>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    label: &str,
    unit: &str,
    value: &str,
    color: Rgb565,
    trend: Option<bool>,
) {
    // Always redraw background - values change and would leave artifacts
    draw_cell_background(display, x, y, w, h, BLACK);

    let label_style = MonoTextStyle::new(LABEL_FONT, color);
    Text::with_text_style(label, Point::new(x as i32 + 6, y as i32 + 13), label_style, LEFT_ALIGNED)
        .draw(display)
        .ok();

    Text::with_text_style(
        unit,
        Point::new((x + w) as i32 - 6, y as i32 + 13),
        LABEL_STYLE_GRAY,
        crate::styles::RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();

    let center_x = (x + w / 2) as i32;
    let value_y = (y + h / 2) as i32 + 10;
    let value_style = value_style_for_color(color);
    Text::with_text_style(value, Point::new(center_x, value_y), value_style, CENTERED)
        .draw(display)
        .ok();

    if let Some(rising) = trend {
        draw_trend_arrow(display, (x + w) as i32 - 12, value_y - 10, rising, WHITE);
    }
}

// =============================================================================
// Specific Cells
// =============================================================================

/// Draw the heart rate cell with trend arrow and pulse indicator.
///
/// `pulse_lit` lights the dot in the top-right area for the beep flash
/// window after each heart beep.
#[allow(clippy::too_many_arguments)]
pub fn draw_hr_cell(
    display: &mut SimulatorDisplay<Rgb565>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    record: Option<&VitalsRecord>,
    trend: &VitalTrend,
    pulse_lit: bool,
) {
    let value = format_value(record.and_then(VitalsRecord::heart_rate_display), 0);
    draw_vital_cell(display, x, y, w, h, "HR", "bpm", &value, ECG_GREEN, trend.direction());

    if pulse_lit {
        Circle::new(Point::new((x + w) as i32 - 22, y as i32 + 6), 8)
            .into_styled(PrimitiveStyle::with_fill(ECG_GREEN))
            .draw(display)
            .ok();
    }
}

/// Draw the SpO2 cell with trend arrow.
pub fn draw_spo2_cell(
    display: &mut SimulatorDisplay<Rgb565>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    record: Option<&VitalsRecord>,
    trend: &VitalTrend,
) {
    let value = format_value(record.and_then(VitalsRecord::spo2_display), 0);
    draw_vital_cell(display, x, y, w, h, "SpO2", "%", &value, SPO2_CYAN, trend.direction());
}

/// Draw the non-invasive blood pressure cell ("120/80").
pub fn draw_bp_cell(
    display: &mut SimulatorDisplay<Rgb565>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    record: Option<&VitalsRecord>,
) {
    draw_cell_background(display, x, y, w, h, BLACK);

    Text::with_text_style("NIBP", Point::new(x as i32 + 6, y as i32 + 13), LABEL_STYLE_WHITE, LEFT_ALIGNED)
        .draw(display)
        .ok();
    Text::with_text_style(
        "mmHg",
        Point::new((x + w) as i32 - 6, y as i32 + 13),
        LABEL_STYLE_GRAY,
        crate::styles::RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();

    let sys = format_value(record.and_then(VitalsRecord::bp_sys), 0);
    let dia = format_value(record.and_then(VitalsRecord::bp_dia), 0);
    let mut value: String<16> = String::new();
    let _ = write!(value, "{sys}/{dia}");

    // The combined sys/dia value needs the medium font to fit the cell
    let value_style = MonoTextStyle::new(VALUE_FONT_MEDIUM, WHITE);
    Text::with_text_style(
        &value,
        Point::new((x + w / 2) as i32, (y + h / 2) as i32 + 8),
        value_style,
        CENTERED,
    )
    .draw(display)
    .ok();
}

/// Draw the body temperature cell.
pub fn draw_temp_cell(
    display: &mut SimulatorDisplay<Rgb565>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    record: Option<&VitalsRecord>,
) {
    let value = format_value(record.and_then(VitalsRecord::temperature_c), 1);
    draw_vital_cell(display, x, y, w, h, "TEMP", "C", &value, WHITE, None);
}

/// Draw the respiratory rate cell.
pub fn draw_resp_cell(
    display: &mut SimulatorDisplay<Rgb565>,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    record: Option<&VitalsRecord>,
) {
    let value = format_value(record.and_then(VitalsRecord::respiratory_rate_pm), 0);
    draw_vital_cell(display, x, y, w, h, "RESP", "/min", &value, ETCO2_YELLOW, None);
}

// =============================================================================
// Observations Band
// =============================================================================

/// Maximum observation characters per displayed line (6px glyphs across the
/// trace-area width with margins).
const OBS_LINE_CHARS: usize = 54;

/// Draw the observations band under the trace strips: up to two lines of
/// observation text (or a placeholder) plus the record timestamp.
pub fn draw_observations(display: &mut SimulatorDisplay<Rgb565>, record: Option<&VitalsRecord>) {
    let y = (SCREEN_HEIGHT - OBS_HEIGHT) as u32;
    draw_cell_background(display, 0, y, TRACE_AREA_WIDTH, OBS_HEIGHT, BLACK);

    let text_x = 6;
    let line1_y = y as i32 + 14;
    let line2_y = y as i32 + 26;
    let stamp_y = y as i32 + 40;

    match record.and_then(VitalsRecord::observations_text) {
        Some(obs) => {
            let (first, rest) = split_line(obs, OBS_LINE_CHARS);
            let mut line: String<64> = String::new();
            let _ = line.push_str(first);
            Text::with_text_style(&line, Point::new(text_x, line1_y), LABEL_STYLE_WHITE, LEFT_ALIGNED)
                .draw(display)
                .ok();

            if !rest.is_empty() {
                let (second, overflow) = split_line(rest, OBS_LINE_CHARS - 2);
                let mut line2: String<64> = String::new();
                let _ = line2.push_str(second);
                if !overflow.is_empty() {
                    let _ = line2.push_str("..");
                }
                Text::with_text_style(&line2, Point::new(text_x, line2_y), LABEL_STYLE_WHITE, LEFT_ALIGNED)
                    .draw(display)
                    .ok();
            }
        }
        None => {
            Text::with_text_style(
                "No observations recorded",
                Point::new(text_x, line1_y),
                LABEL_STYLE_GRAY,
                LEFT_ALIGNED,
            )
            .draw(display)
            .ok();
        }
    }

    if let Some(stamp) = record.and_then(|r| r.timestamp.as_deref()) {
        let mut line: String<64> = String::new();
        let _ = write!(line, "Last updated: {stamp}");
        Text::with_text_style(&line, Point::new(text_x, stamp_y), LABEL_STYLE_GRAY, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }
}

/// Split `text` at a character boundary no later than `max_chars`.
fn split_line(text: &str, max_chars: usize) -> (&str, &str) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_present_and_missing() {
        assert_eq!(format_value(Some(72.0), 0).as_str(), "72");
        assert_eq!(format_value(Some(36.62), 1).as_str(), "36.6");
        assert_eq!(format_value(None, 0).as_str(), "--");
    }

    #[test]
    fn test_split_line_short_text() {
        let (a, b) = split_line("short", 10);
        assert_eq!(a, "short");
        assert_eq!(b, "");
    }

    #[test]
    fn test_split_line_long_text() {
        let (a, b) = split_line("abcdefghij", 4);
        assert_eq!(a, "abcd");
        assert_eq!(b, "efghij");
    }

    #[test]
    fn test_split_line_multibyte_safe() {
        // Must split on character boundaries, not bytes
        let (a, b) = split_line("ääää", 2);
        assert_eq!(a, "ää");
        assert_eq!(b, "ää");
    }

    #[test]
    fn test_cells_tolerate_missing_record() {
        // Drawing with no record must render placeholders, not panic
        let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(480, 320));
        let trend = VitalTrend::new(1.0);
        draw_hr_cell(&mut display, 340, 26, 140, 58, None, &trend, false);
        draw_spo2_cell(&mut display, 340, 84, 140, 58, None, &trend);
        draw_bp_cell(&mut display, 340, 142, 140, 58, None);
        draw_temp_cell(&mut display, 340, 200, 140, 58, None);
        draw_resp_cell(&mut display, 340, 258, 140, 58, None);
        draw_observations(&mut display, None);
    }
}
