//! Waveform strip renderer.
//!
//! Each animation tick repaints one strip in three layers:
//!
//! 1. Clear the strip rectangle to black.
//! 2. A fixed-spacing grid of vertical and horizontal lines in a
//!    low-intensity, signal-specific tint.
//! 3. The trace itself: one connected polyline built by sampling the
//!    waveform engine at every pixel column, drawn twice - a 3px stroke in
//!    the dim glow color underneath, then a 1px stroke in the bright channel
//!    color on top. The two-pass stroke is what gives the phosphor look.
//!
//! Each renderer owns its strip exclusively and never touches another
//! signal's pixels. Strip geometry is re-read from the parameters on every
//! call rather than cached, so a relayout takes effect on the next tick.
//! A degenerate strip (zero or tiny area) makes the call a no-op.

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use embedded_graphics_simulator::SimulatorDisplay;

use crate::{
    colors::{BLACK, ECG_GLOW, ECG_GREEN, ECG_GRID, ETCO2_GLOW, ETCO2_GRID, ETCO2_YELLOW, SPO2_CYAN, SPO2_GLOW, SPO2_GRID},
    config::GRID_SPACING,
    styles::{LABEL_FONT, LEFT_ALIGNED},
    waveform::WaveformEngine,
};

/// Maximum strip width the column buffer accommodates.
const MAX_TRACE_WIDTH: usize = 512;

/// Visual parameters of one waveform strip.
pub struct TraceStyle {
    /// Channel label drawn in the top-left corner.
    pub label: &'static str,
    /// Bright trace color.
    pub color: Rgb565,
    /// Dim underlay color for the glow pass.
    pub glow: Rgb565,
    /// Near-black tint of the background grid.
    pub grid: Rgb565,
    /// Baseline position as a fraction of strip height from the top.
    pub baseline_frac: f32,
    /// Vertical scale: pixels per normalized amplitude unit, as a fraction
    /// of strip height.
    pub amp_frac: f32,
}

/// ECG strip: green, baseline low-center, bipolar deflections.
pub const ECG_TRACE: TraceStyle = TraceStyle {
    label: "ECG II",
    color: ECG_GREEN,
    glow: ECG_GLOW,
    grid: ECG_GRID,
    baseline_frac: 0.62,
    amp_frac: 0.26,
};

/// Plethysmograph strip: cyan, unipolar pulse rising from a low baseline.
pub const SPO2_TRACE: TraceStyle = TraceStyle {
    label: "PLETH",
    color: SPO2_CYAN,
    glow: SPO2_GLOW,
    grid: SPO2_GRID,
    baseline_frac: 0.85,
    amp_frac: 0.65,
};

/// Capnogram strip: yellow, unipolar breath plateau.
pub const ETCO2_TRACE: TraceStyle = TraceStyle {
    label: "EtCO2",
    color: ETCO2_YELLOW,
    glow: ETCO2_GLOW,
    grid: ETCO2_GRID,
    baseline_frac: 0.88,
    amp_frac: 0.72,
};

/// Repaint one waveform strip at `(x, y)` with size `w` x `h`.
///
/// Samples the engine once per pixel column into a stack buffer, then
/// strokes the glow and bright passes from the same samples (two passes over
/// one sampling keeps the noise identical between the layers).
pub fn draw_trace(
    display: &mut SimulatorDisplay<Rgb565>,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    engine: &mut WaveformEngine,
    style: &TraceStyle,
) {
    // Degenerate or missing surface: the tick is a no-op
    if w < 8 || h < 8 {
        return;
    }
    let w = w.min(MAX_TRACE_WIDTH as u32);

    // Layer 1: clear the strip
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();

    // Layer 2: background grid at fixed spacing
    let grid_style = PrimitiveStyle::with_stroke(style.grid, 1);
    let right = x + w as i32 - 1;
    let bottom = y + h as i32 - 1;
    let mut gx = x + GRID_SPACING;
    while gx < right {
        Line::new(Point::new(gx, y), Point::new(gx, bottom))
            .into_styled(grid_style)
            .draw(display)
            .ok();
        gx += GRID_SPACING;
    }
    let mut gy = y + GRID_SPACING;
    while gy < bottom {
        Line::new(Point::new(x, gy), Point::new(right, gy))
            .into_styled(grid_style)
            .draw(display)
            .ok();
        gy += GRID_SPACING;
    }

    // Layer 3: sample the engine at every column
    let baseline_y = y as f32 + style.baseline_frac * h as f32;
    let amp_scale = style.amp_frac * h as f32;
    let mut ys: heapless::Vec<i32, MAX_TRACE_WIDTH> = heapless::Vec::new();
    // Clamp one pixel inside the strip so the 3px glow stroke cannot bleed
    // onto a neighboring strip.
    for col in 0..w {
        let amplitude = engine.sample_column(col as f32);
        let py = (baseline_y - amplitude * amp_scale) as i32;
        let _ = ys.push(py.clamp(y + 1, bottom - 1));
    }

    // Glow underlay first, bright stroke on top
    stroke_polyline(display, x, &ys, PrimitiveStyle::with_stroke(style.glow, 3));
    stroke_polyline(display, x, &ys, PrimitiveStyle::with_stroke(style.color, 1));

    // Channel label, dimmed to gray while the signal is frozen at baseline
    let label_color = if engine.is_active() { style.color } else { crate::colors::GRAY };
    let label_style = embedded_graphics::mono_font::MonoTextStyle::new(LABEL_FONT, label_color);
    Text::with_text_style(style.label, Point::new(x + 4, y + 12), label_style, LEFT_ALIGNED)
        .draw(display)
        .ok();
}

/// Stroke a single connected polyline through the sampled columns.
fn stroke_polyline(display: &mut SimulatorDisplay<Rgb565>, x0: i32, ys: &[i32], stroke: PrimitiveStyle<Rgb565>) {
    for (i, pair) in ys.windows(2).enumerate() {
        let x = x0 + i as i32;
        Line::new(Point::new(x, pair[0]), Point::new(x + 1, pair[1]))
            .into_styled(stroke)
            .draw(display)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::{SignalParams, WaveformKind};

    fn live_params() -> SignalParams {
        SignalParams {
            heart_rate_bpm: Some(60.0),
            spo2_percent: Some(98.0),
            present: true,
        }
    }

    #[test]
    fn test_degenerate_strip_is_noop() {
        let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(64, 64));
        let mut engine = WaveformEngine::with_seed(WaveformKind::Ecg, 1);
        engine.tick(&live_params());
        // Must not panic or draw anything on zero/tiny strips
        draw_trace(&mut display, 0, 0, 0, 0, &mut engine, &ECG_TRACE);
        draw_trace(&mut display, 0, 0, 4, 4, &mut engine, &ECG_TRACE);
    }

    #[test]
    fn test_trace_draws_within_strip_bounds() {
        // The strip renderer owns rows [16, 16+60); rows outside must stay
        // untouched (disjoint surfaces per signal).
        let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(128, 128));
        display.clear(Rgb565::MAGENTA).ok();

        let mut engine = WaveformEngine::with_seed(WaveformKind::Ecg, 1);
        engine.tick(&live_params());
        draw_trace(&mut display, 0, 16, 128, 60, &mut engine, &ECG_TRACE);

        for x in 0..128 {
            assert_eq!(
                display.get_pixel(Point::new(x, 8)),
                Rgb565::MAGENTA,
                "pixel above the strip was touched"
            );
            assert_eq!(
                display.get_pixel(Point::new(x, 100)),
                Rgb565::MAGENTA,
                "pixel below the strip was touched"
            );
        }
    }

    #[test]
    fn test_flat_baseline_when_engine_frozen() {
        // A frozen engine samples 0.0 everywhere; the bright trace must be a
        // single horizontal line at the baseline row.
        let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(100, 80));
        let mut engine = WaveformEngine::with_seed(WaveformKind::Ecg, 1);
        engine.tick(&SignalParams::default());

        draw_trace(&mut display, 0, 0, 100, 80, &mut engine, &ECG_TRACE);

        // Scan to the right of the channel label, which shares the trace color
        let baseline_row = (0.62 * 80.0) as i32;
        let mut bright_rows = std::collections::BTreeSet::new();
        for x in 60..100 {
            for y in 0..80 {
                if display.get_pixel(Point::new(x, y)) == ECG_TRACE.color {
                    bright_rows.insert(y);
                }
            }
        }
        assert!(
            bright_rows.iter().all(|row| (row - baseline_row).abs() <= 1),
            "frozen trace should be flat at the baseline, got rows {bright_rows:?}"
        );
    }
}
