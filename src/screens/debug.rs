//! Debug/profiling page rendering.
//!
//! Displays frame timing statistics, render/intake counters, and a debug log
//! terminal. Accessible by pressing `Y` to toggle from the monitor view.
//!
//! ```text
//! DEBUG VIEW                     UP 00:12:34            53 FPS
//! -------------------------------------------------------------
//! TIMING            RENDER            INTAKE
//! Frame:  20.0ms    Frames: 12847     Updates: 312
//! Render: 0.5ms     Headers: 12       Errors: 0
//! Sleep:  19.5ms    Traces: 38541     Beeps: 844
//! Min:    19.8ms    Cells: 64235
//! Max:    25.1ms    Dividers: 3
//! Avg:    20.1ms
//! -------------------------------------------------------------
//! > System started
//! > Vitals updated
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorDisplay;
use heapless::String;

use crate::colors::{BLACK, ECG_GREEN, ETCO2_YELLOW, GRAY, SPO2_CYAN, WHITE};
use crate::config::SCREEN_WIDTH;
use crate::profiling::{DebugLog, ProfilingMetrics};
use crate::styles::LABEL_FONT;

// =============================================================================
// Layout Constants
// =============================================================================

/// Header Y position (text baseline)
const HEADER_Y: i32 = 12;

/// Y position of divider below header
const HEADER_DIVIDER_Y: i32 = 18;

/// Y position where stats section headers start
const SECTION_HEADER_Y: i32 = 30;

/// Y position where stats values start
const STATS_Y: i32 = 44;

/// Y position of divider above log
const LOG_DIVIDER_Y: i32 = 220;

/// Y position where log terminal starts
const LOG_Y: i32 = 232;

/// Height of each log line (compact)
const LOG_LINE_HEIGHT: i32 = 13;

/// X position for left column (frame timing)
const COL1_X: i32 = 6;

/// X position for middle column (render stats)
const COL2_X: i32 = 170;

/// X position for right column (intake/beeps)
const COL3_X: i32 = 330;

/// Line height for stats (compact)
const STAT_LINE_HEIGHT: i32 = 14;

// =============================================================================
// Colors
// =============================================================================

/// Header text color
const HEADER_COLOR: Rgb565 = ECG_GREEN;

/// Section header color (dimmer)
const SECTION_COLOR: Rgb565 = GRAY;

/// Value color (bright)
const VALUE_COLOR: Rgb565 = WHITE;

/// Highlight color for min/max/avg
const HIGHLIGHT_COLOR: Rgb565 = ETCO2_YELLOW;

/// Log prompt color
const LOG_PROMPT_COLOR: Rgb565 = ECG_GREEN;

/// Log text color
const LOG_TEXT_COLOR: Rgb565 = SPO2_CYAN;

// =============================================================================
// Debug Page Drawing
// =============================================================================

/// Draw the debug/profiling page.
pub fn draw_debug_page(display: &mut SimulatorDisplay<Rgb565>, metrics: &ProfilingMetrics, log: &DebugLog, fps: f32) {
    display.clear(BLACK).ok();

    draw_page_header(display, metrics, fps);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);

    draw_section_headers(display);
    draw_timing_column(display, metrics);
    draw_render_column(display, metrics);
    draw_intake_column(display, metrics);

    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, log);
}

/// Draw the page header: title, uptime, FPS.
fn draw_page_header(display: &mut SimulatorDisplay<Rgb565>, metrics: &ProfilingMetrics, fps: f32) {
    let header_style = MonoTextStyle::new(LABEL_FONT, HEADER_COLOR);
    Text::new("DEBUG VIEW", Point::new(COL1_X, HEADER_Y), header_style)
        .draw(display)
        .ok();

    let uptime = metrics.uptime().as_secs();
    let mut uptime_str: String<24> = String::new();
    let _ = write!(
        uptime_str,
        "UP {:02}:{:02}:{:02}",
        uptime / 3600,
        (uptime / 60) % 60,
        uptime % 60
    );
    Text::new(&uptime_str, Point::new(COL2_X, HEADER_Y), header_style)
        .draw(display)
        .ok();

    let mut fps_str: String<16> = String::new();
    let _ = write!(fps_str, "{fps:.0} FPS");
    Text::new(&fps_str, Point::new((SCREEN_WIDTH - 50) as i32, HEADER_Y), header_style)
        .draw(display)
        .ok();
}

/// Draw the three section headers.
fn draw_section_headers(display: &mut SimulatorDisplay<Rgb565>) {
    let style = MonoTextStyle::new(LABEL_FONT, SECTION_COLOR);
    Text::new("TIMING", Point::new(COL1_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
    Text::new("RENDER", Point::new(COL2_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
    Text::new("INTAKE", Point::new(COL3_X, SECTION_HEADER_Y), style)
        .draw(display)
        .ok();
}

/// Draw the frame timing column.
fn draw_timing_column(display: &mut SimulatorDisplay<Rgb565>, metrics: &ProfilingMetrics) {
    let value_style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);
    let highlight_style = MonoTextStyle::new(LABEL_FONT, HIGHLIGHT_COLOR);

    let rows: [(&str, u32, bool); 6] = [
        ("Frame:", metrics.frame_time_us, false),
        ("Render:", metrics.render_time_us, false),
        ("Sleep:", metrics.sleep_time_us, false),
        ("Min:", metrics.frame_time_min_us, true),
        ("Max:", metrics.frame_time_max_us, true),
        ("Avg:", metrics.frame_time_avg_us(), true),
    ];

    for (i, (label, us, highlight)) in rows.iter().enumerate() {
        let y = STATS_Y + i as i32 * STAT_LINE_HEIGHT;
        let style = if *highlight { highlight_style } else { value_style };
        let mut line: String<32> = String::new();
        // Min starts at u32::MAX until the first frame lands
        let ms = if *us == u32::MAX { 0.0 } else { *us as f32 / 1000.0 };
        let _ = write!(line, "{label:<8}{ms:.1}ms");
        Text::new(&line, Point::new(COL1_X, y), style).draw(display).ok();
    }
}

/// Draw the render counters column.
fn draw_render_column(display: &mut SimulatorDisplay<Rgb565>, metrics: &ProfilingMetrics) {
    let style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);

    let rows: [(&str, u64); 5] = [
        ("Frames:", metrics.total_frames),
        ("Headers:", u64::from(metrics.header_redraws)),
        ("Traces:", u64::from(metrics.trace_draws)),
        ("Cells:", u64::from(metrics.cell_draws)),
        ("Dividers:", u64::from(metrics.divider_redraws)),
    ];

    for (i, (label, count)) in rows.iter().enumerate() {
        let y = STATS_Y + i as i32 * STAT_LINE_HEIGHT;
        let mut line: String<32> = String::new();
        let _ = write!(line, "{label:<10}{count}");
        Text::new(&line, Point::new(COL2_X, y), style).draw(display).ok();
    }
}

/// Draw the intake/beep counters column.
fn draw_intake_column(display: &mut SimulatorDisplay<Rgb565>, metrics: &ProfilingMetrics) {
    let style = MonoTextStyle::new(LABEL_FONT, VALUE_COLOR);

    let rows: [(&str, u32); 3] = [
        ("Updates:", metrics.intake_updates),
        ("Errors:", metrics.intake_errors),
        ("Beeps:", metrics.beeps_emitted),
    ];

    for (i, (label, count)) in rows.iter().enumerate() {
        let y = STATS_Y + i as i32 * STAT_LINE_HEIGHT;
        let mut line: String<32> = String::new();
        let _ = write!(line, "{label:<9}{count}");
        Text::new(&line, Point::new(COL3_X, y), style).draw(display).ok();
    }
}

/// Draw the debug log terminal at the bottom.
fn draw_log_terminal(display: &mut SimulatorDisplay<Rgb565>, log: &DebugLog) {
    let prompt_style = MonoTextStyle::new(LABEL_FONT, LOG_PROMPT_COLOR);
    let text_style = MonoTextStyle::new(LABEL_FONT, LOG_TEXT_COLOR);

    for (i, line) in log.iter().enumerate() {
        let y = LOG_Y + i as i32 * LOG_LINE_HEIGHT;
        Text::new(">", Point::new(COL1_X, y), prompt_style).draw(display).ok();
        Text::new(line, Point::new(COL1_X + 12, y), text_style).draw(display).ok();
    }
}

/// Draw a gray horizontal divider across the page.
fn draw_horizontal_line(display: &mut SimulatorDisplay<Rgb565>, y: i32) {
    Line::new(Point::new(0, y), Point::new((SCREEN_WIDTH - 1) as i32, y))
        .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
        .draw(display)
        .ok();
}
