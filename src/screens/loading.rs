//! Loading screen with console-style initialization messages.
//!
//! Displays a boot sequence with an animated spinner and sequential messages
//! while the monitor view warms up.
//!
//! ```text
//! |  Starting monitor  /
//! ----------------------------------
//!   Initializing display...
//!   Opening vitals channel...
//! > Calibrating waveforms...
//! ```

use core::fmt::Write;
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::{SimulatorDisplay, SimulatorEvent, Window};
use heapless::String;

use crate::colors::{BLACK, ECG_GREEN};
use crate::config::SCREEN_WIDTH;
use crate::styles::{CENTERED, LEFT_ALIGNED};

// =============================================================================
// Loading Screen Layout Constants
// =============================================================================

/// Title text position (horizontally centered)
const TITLE_POS: Point = Point::new((SCREEN_WIDTH / 2) as i32, 25);

/// Divider line start (left edge with margin)
const LINE_START: Point = Point::new(10, 35);

/// Divider line end (right edge with margin)
const LINE_END: Point = Point::new((SCREEN_WIDTH - 10) as i32, 35);

/// Console text X position (left margin)
const CONSOLE_X: i32 = 10;

/// Console first line Y position
const CONSOLE_START_Y: i32 = 50;

/// Vertical spacing between console lines
const CONSOLE_LINE_HEIGHT: i32 = 14;

// =============================================================================
// Pre-computed Styles
// =============================================================================

/// Green title text style (`FONT_10X20`), monitor-phosphor look.
const TITLE_STYLE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&embedded_graphics::mono_font::ascii::FONT_10X20, ECG_GREEN);

/// Green console text style (`FONT_6X10`).
const CONSOLE_STYLE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&embedded_graphics::mono_font::ascii::FONT_6X10, ECG_GREEN);

/// Green stroke style for the divider line (1px wide).
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(ECG_GREEN, 1);

// =============================================================================
// Loading Screen Function
// =============================================================================

/// Run the loading screen boot sequence.
///
/// Displays initialization messages with an animated spinner.
/// Returns `false` if the window is closed, `true` when the sequence
/// completes.
pub fn run_loading_screen(display: &mut SimulatorDisplay<Rgb565>, window: &mut Window) -> bool {
    // Init messages: (text, display duration in ms)
    let init_messages = [
        ("Initializing display...", 700),
        ("Opening vitals channel...", 900),
        ("Calibrating waveforms...", 800),
        ("ECG / PLETH / EtCO2 online", 600),
        ("Audio check: 800Hz / 1200Hz", 600),
        ("Ready.", 500),
    ];

    // Spinner animation characters (classic text-mode spinner)
    let spinner_chars = ['|', '/', '-', '\\'];
    let mut spinner_idx = 0;
    let mut spinner_frame = 0u32;

    // Console line buffer (scrolls when > 12 lines)
    let mut console_lines: Vec<&str> = Vec::new();

    for (msg, duration_ms) in &init_messages {
        console_lines.push(msg);
        if console_lines.len() > 12 {
            console_lines.remove(0);
        }

        let msg_start = Instant::now();
        let msg_duration = Duration::from_millis(*duration_ms as u64);

        while msg_start.elapsed() < msg_duration {
            for ev in window.events() {
                if matches!(ev, SimulatorEvent::Quit) {
                    return false;
                }
            }

            display.clear(BLACK).ok();

            // Update spinner every 8 frames (~130ms) for a calmer spin
            spinner_frame = spinner_frame.wrapping_add(1);
            if spinner_frame.is_multiple_of(8) {
                spinner_idx = (spinner_idx + 1) % spinner_chars.len();
            }
            let left_spinner = spinner_chars[spinner_idx];
            let right_spinner = spinner_chars[(spinner_idx + 2) % spinner_chars.len()];

            let mut loading_text: String<32> = String::new();
            let _ = write!(loading_text, "{left_spinner}  Starting monitor  {right_spinner}");
            Text::with_text_style(&loading_text, TITLE_POS, TITLE_STYLE, CENTERED)
                .draw(display)
                .ok();

            Line::new(LINE_START, LINE_END)
                .into_styled(DIVIDER_STYLE)
                .draw(display)
                .ok();

            for (i, line) in console_lines.iter().enumerate() {
                let y_pos = CONSOLE_START_Y + (i as i32 * CONSOLE_LINE_HEIGHT);
                // Current (last) line gets ">" prefix, others get "  " for alignment
                let prefix = if i == console_lines.len() - 1 { "> " } else { "  " };
                let mut full_line: String<64> = String::new();
                let _ = write!(full_line, "{prefix}{line}");
                Text::with_text_style(&full_line, Point::new(CONSOLE_X, y_pos), CONSOLE_STYLE, LEFT_ALIGNED)
                    .draw(display)
                    .ok();
            }

            window.update(display);
            thread::sleep(Duration::from_millis(16));
        }
    }

    // Brief pause after "Ready." before the monitor view appears
    thread::sleep(Duration::from_millis(600));
    true
}
